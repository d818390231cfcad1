//! Channel definitions loaded from asset JSON.
//!
//! Asset pipelines describe the initial channel set as a JSON array; each
//! entry names the channel, the clip path, and any non-default starting
//! parameters.

use serde::Deserialize;

use crate::params::{ChannelParams, RolloffMode};

fn default_volume() -> f32 {
    1.0
}

fn default_pitch() -> f32 {
    1.0
}

fn default_doppler() -> f32 {
    1.0
}

fn default_min_distance() -> f32 {
    1.0
}

fn default_max_distance() -> f32 {
    500.0
}

/// One channel entry in a definitions file.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelDef {
    pub name: String,
    pub path: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    #[serde(default)]
    pub looping: bool,
    #[serde(default)]
    pub spatial_blend: f32,
    #[serde(default = "default_doppler")]
    pub doppler_level: f32,
    #[serde(default)]
    pub spread: f32,
    #[serde(default)]
    pub rolloff: RolloffMode,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
    #[serde(default)]
    pub mixer_group: Option<String>,
}

impl ChannelDef {
    pub fn params(&self) -> ChannelParams {
        ChannelParams {
            volume: self.volume,
            pitch: self.pitch,
            looping: self.looping,
            spatial_blend: self.spatial_blend,
            doppler_level: self.doppler_level,
            spread: self.spread,
            rolloff: self.rolloff,
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            mixer_group: self.mixer_group.clone(),
        }
    }
}

/// Parse a definitions file body into channel entries.
pub fn parse_defs(json: &str) -> Result<Vec<ChannelDef>, serde_json::Error> {
    serde_json::from_str(json)
}

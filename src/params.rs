//! Per-channel playback parameters and change notification.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Distance-attenuation curve for spatialized playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RolloffMode {
    #[default]
    Logarithmic,
    Linear,
}

/// Scalar playback parameters shared by a channel and its children.
///
/// Position and parent transform are deliberately absent; those belong to
/// the individual child instance and never mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelParams {
    pub volume: f32,
    pub pitch: f32,
    pub looping: bool,
    /// 0.0 is fully 2D, 1.0 fully 3D.
    pub spatial_blend: f32,
    pub doppler_level: f32,
    pub spread: f32,
    pub rolloff: RolloffMode,
    pub min_distance: f32,
    pub max_distance: f32,
    pub mixer_group: Option<String>,
}

impl Default for ChannelParams {
    fn default() -> Self {
        Self {
            volume: 1.0,
            pitch: 1.0,
            looping: false,
            spatial_blend: 0.0,
            doppler_level: 1.0,
            spread: 0.0,
            rolloff: RolloffMode::Logarithmic,
            min_distance: 1.0,
            max_distance: 500.0,
            mixer_group: None,
        }
    }
}

/// Queue of channel names whose parameters changed since the last drain.
///
/// Shared between the registry and every [`ParameterStore`]; the registry
/// drains it after each mutation to re-sync children and fire subscriber
/// callbacks.
#[derive(Debug, Clone, Default)]
pub struct ChangeFeed(Rc<RefCell<Vec<String>>>);

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, channel: &str) {
        self.0.borrow_mut().push(channel.to_string());
    }

    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Owner of a channel's [`ChannelParams`].
///
/// Every setter pushes one change-feed entry per call, even when the value
/// did not change. No validation happens here.
#[derive(Debug)]
pub struct ParameterStore {
    channel: String,
    params: ChannelParams,
    feed: ChangeFeed,
}

impl ParameterStore {
    pub fn new(channel: &str, params: ChannelParams, feed: ChangeFeed) -> Self {
        Self {
            channel: channel.to_string(),
            params,
            feed,
        }
    }

    pub fn params(&self) -> &ChannelParams {
        &self.params
    }

    /// Replace the whole parameter set with a single notification.
    pub fn set_all(&mut self, params: ChannelParams) {
        self.params = params;
        self.feed.push(&self.channel);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.params.volume = volume;
        self.feed.push(&self.channel);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.params.pitch = pitch;
        self.feed.push(&self.channel);
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.params.looping = looping;
        self.feed.push(&self.channel);
    }

    pub fn set_spatial_blend(&mut self, blend: f32) {
        self.params.spatial_blend = blend;
        self.feed.push(&self.channel);
    }

    pub fn set_doppler_level(&mut self, doppler: f32) {
        self.params.doppler_level = doppler;
        self.feed.push(&self.channel);
    }

    pub fn set_spread(&mut self, spread: f32) {
        self.params.spread = spread;
        self.feed.push(&self.channel);
    }

    pub fn set_rolloff(&mut self, rolloff: RolloffMode) {
        self.params.rolloff = rolloff;
        self.feed.push(&self.channel);
    }

    pub fn set_distances(&mut self, min: f32, max: f32) {
        self.params.min_distance = min;
        self.params.max_distance = max;
        self.feed.push(&self.channel);
    }

    pub fn set_mixer_group(&mut self, group: Option<String>) {
        self.params.mixer_group = group;
        self.feed.push(&self.channel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setter_notifies_once_per_call() {
        let feed = ChangeFeed::new();
        let mut store = ParameterStore::new("bgm", ChannelParams::default(), feed.clone());

        store.set_volume(0.5);
        store.set_volume(0.5);
        store.set_pitch(1.0);

        let changed = feed.drain();
        assert_eq!(changed, vec!["bgm", "bgm", "bgm"]);
        assert!(feed.is_empty());
    }

    #[test]
    fn unchanged_value_still_notifies() {
        let feed = ChangeFeed::new();
        let mut store = ParameterStore::new("sfx", ChannelParams::default(), feed.clone());

        let volume = store.params().volume;
        store.set_volume(volume);

        assert_eq!(feed.drain().len(), 1);
    }

    #[test]
    fn set_all_notifies_once() {
        let feed = ChangeFeed::new();
        let mut store = ParameterStore::new("sfx", ChannelParams::default(), feed.clone());

        let mut params = ChannelParams::default();
        params.volume = 0.25;
        params.looping = true;
        store.set_all(params.clone());

        assert_eq!(store.params(), &params);
        assert_eq!(feed.drain().len(), 1);
    }
}

//! Stepped fades over volume, pitch, and mixer-exposed values.
//!
//! Overlapping fades on the same target are not mutually excluded; they
//! race and the last writer wins per tick.

use crate::backend::AudioBackend;
use crate::error::AudioError;
use crate::interp::{FadeTarget, FadeTask};

use super::ChannelRegistry;

impl<B: AudioBackend> ChannelRegistry<B> {
    /// Fade the channel's volume to `end` over `duration` seconds in
    /// `granularity` discrete steps.
    pub fn lerp_volume(
        &mut self,
        name: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError> {
        let current = self.checked(name)?.params().volume;
        let now = self.scheduler_clock()?;
        let task = FadeTask::plan(
            name,
            FadeTarget::Volume,
            current,
            end,
            duration,
            granularity,
            now,
        )?;
        self.push_fade(task)
    }

    /// Fade the channel's pitch to `end` over `duration` seconds in
    /// `granularity` discrete steps.
    pub fn lerp_pitch(
        &mut self,
        name: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError> {
        let current = self.checked(name)?.params().pitch;
        let now = self.scheduler_clock()?;
        let task = FadeTask::plan(
            name,
            FadeTarget::Pitch,
            current,
            end,
            duration,
            granularity,
            now,
        )?;
        self.push_fade(task)
    }

    /// Fade a mixer-exposed parameter. The starting value is read fresh
    /// from the backend, never from a local cache, and every step writes
    /// back through the exposed-parameter accessor.
    pub fn lerp_group_value(
        &mut self,
        name: &str,
        parameter: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError> {
        let channel = self.checked(name)?;
        if channel.params().mixer_group.is_none() {
            return Err(AudioError::MissingMixerGroup);
        }
        let now = self.scheduler_clock()?;
        let current = self
            .backend
            .exposed_parameter(parameter)
            .ok_or(AudioError::MixerNotExposed)?;
        let task = FadeTask::plan(
            name,
            FadeTarget::Exposed(parameter.to_string()),
            current,
            end,
            duration,
            granularity,
            now,
        )?;
        self.push_fade(task)
    }
}

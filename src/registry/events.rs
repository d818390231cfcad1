//! Progress and parameters-changed subscriptions.

use crate::backend::AudioBackend;
use crate::channel::ChildTag;
use crate::error::AudioError;
use crate::progress::{validate_threshold, ProgressCallback, ProgressContext};

use super::{ChangedCallback, ChannelRegistry};

impl<B: AudioBackend> ChannelRegistry<B> {
    /// Watch the channel's playback and invoke `callback` once its progress
    /// passes `progress` in the direction implied by the current pitch.
    pub fn subscribe_progress(
        &mut self,
        name: &str,
        progress: f64,
        callback: ProgressCallback,
    ) -> Result<(), AudioError> {
        let pitch = self.checked(name)?.params().pitch;
        self.scheduler_clock()?;
        validate_threshold(progress, pitch)?;
        self.scheduler
            .as_mut()
            .ok_or(AudioError::MissingParent)?
            .watches
            .subscribe(name, progress, callback)
    }

    /// Cancel the watch registered for this exact (channel, fraction) pair.
    pub fn unsubscribe_progress(&mut self, name: &str, progress: f64) -> Result<(), AudioError> {
        self.channel(name)?;
        self.scheduler
            .as_mut()
            .ok_or(AudioError::MissingParent)?
            .watches
            .unsubscribe(name, progress)
    }

    /// Register the channel's parameters-changed callback, fired after each
    /// parameter mutation once children have been re-synced.
    pub fn subscribe_changed(
        &mut self,
        name: &str,
        callback: ChangedCallback,
    ) -> Result<(), AudioError> {
        self.channel(name)?;
        if self.changed.contains_key(name) {
            return Err(AudioError::AlreadySubscribed);
        }
        self.changed.insert(name.to_string(), callback);
        Ok(())
    }

    pub fn unsubscribe_changed(&mut self, name: &str) -> Result<(), AudioError> {
        self.channel(name)?;
        self.changed
            .remove(name)
            .map(|_| ())
            .ok_or(AudioError::NotSubscribed)
    }
}

/// Re-entry surface handed to firing progress callbacks.
impl<B: AudioBackend> ProgressContext for ChannelRegistry<B> {
    fn stop(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        ChannelRegistry::stop(self, name, tag)
    }

    fn set_start_time(&mut self, name: &str, seconds: f64) -> Result<(), AudioError> {
        ChannelRegistry::set_start_time(self, name, seconds)
    }

    fn is_looping(&self, name: &str) -> Result<bool, AudioError> {
        Ok(self.channel(name)?.params().looping)
    }

    fn subscribe_progress(
        &mut self,
        name: &str,
        progress: f64,
        callback: ProgressCallback,
    ) -> Result<(), AudioError> {
        ChannelRegistry::subscribe_progress(self, name, progress, callback)
    }

    fn unsubscribe_progress(&mut self, name: &str, progress: f64) -> Result<(), AudioError> {
        ChannelRegistry::unsubscribe_progress(self, name, progress)
    }
}

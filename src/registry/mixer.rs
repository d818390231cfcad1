//! Mixer-group assignment and exposed-parameter access.

use crate::backend::AudioBackend;
use crate::error::AudioError;

use super::ChannelRegistry;

impl<B: AudioBackend> ChannelRegistry<B> {
    /// Route the channel through a mixer group. Replaces any previous
    /// assignment and re-syncs children.
    pub fn add_group(&mut self, name: &str, group: &str) -> Result<(), AudioError> {
        self.checked_mut(name)?
            .store()
            .set_mixer_group(Some(group.to_string()));
        self.flush_changes();
        Ok(())
    }

    /// Detach the channel from its mixer group.
    pub fn remove_group(&mut self, name: &str) -> Result<(), AudioError> {
        if self.checked(name)?.params().mixer_group.is_none() {
            return Err(AudioError::MissingMixerGroup);
        }
        self.checked_mut(name)?.store().set_mixer_group(None);
        self.flush_changes();
        Ok(())
    }

    /// Write a mixer-exposed parameter through the channel's group.
    pub fn set_group_value(
        &mut self,
        name: &str,
        parameter: &str,
        value: f32,
    ) -> Result<(), AudioError> {
        self.require_group(name)?;
        if !self.backend.set_exposed_parameter(parameter, value) {
            return Err(AudioError::MixerNotExposed);
        }
        Ok(())
    }

    /// Read a mixer-exposed parameter through the channel's group.
    pub fn get_group_value(&self, name: &str, parameter: &str) -> Result<f32, AudioError> {
        self.require_group(name)?;
        self.backend
            .exposed_parameter(parameter)
            .ok_or(AudioError::MixerNotExposed)
    }

    /// Reset a mixer-exposed parameter to its default value.
    pub fn reset_group_value(&mut self, name: &str, parameter: &str) -> Result<(), AudioError> {
        self.require_group(name)?;
        if !self.backend.clear_exposed_parameter(parameter) {
            return Err(AudioError::MixerNotExposed);
        }
        Ok(())
    }

    fn require_group(&self, name: &str) -> Result<(), AudioError> {
        if self.checked(name)?.params().mixer_group.is_none() {
            return Err(AudioError::MissingMixerGroup);
        }
        Ok(())
    }
}

//! Null-object registry for the time before the real one is constructed.

use crate::api::AudioControl;
use crate::backend::{InstanceId, ObjectId, Position};
use crate::channel::ChildTag;
use crate::defs::ChannelDef;
use crate::error::AudioError;
use crate::params::ChannelParams;
use crate::progress::ProgressCallback;
use crate::registry::ChangedCallback;

/// Safe fallback implementation of [`AudioControl`].
///
/// Every operation answers [`AudioError::NotInitialized`]; calling code can
/// hold and use it before the host has built the real registry, without a
/// global mutable default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullChannels;

impl NullChannels {
    pub fn new() -> Self {
        Self
    }
}

impl AudioControl for NullChannels {
    fn add_from_path(&mut self, _name: &str, _path: &str) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn add_with_instance(&mut self, _name: &str, _primary: InstanceId) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn add_from_defs(&mut self, _defs: &[ChannelDef]) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn remove_sound(&mut self, _name: &str) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn names(&self) -> Vec<String> {
        Vec::new()
    }

    fn params(&self, _name: &str) -> Result<ChannelParams, AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn set_params(&mut self, _name: &str, _params: ChannelParams) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn set_volume(&mut self, _name: &str, _volume: f32) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn set_looping(&mut self, _name: &str, _looping: bool) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn set_spatial_blend(&mut self, _name: &str, _blend: f32) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn play(&mut self, _name: &str, _tag: ChildTag) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn play_once(&mut self, _name: &str, _tag: ChildTag) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn play_delayed(&mut self, _name: &str, _delay: f64, _tag: ChildTag) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn play_scheduled(&mut self, _name: &str, _at: f64, _tag: ChildTag) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn play_at_timestamp(&mut self, _name: &str, _timestamp: f64) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn stop(&mut self, _name: &str, _tag: ChildTag) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn toggle_pause(&mut self, _name: &str, _tag: ChildTag) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn toggle_mute(&mut self, _name: &str, _tag: ChildTag) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn playback_position(&self, _name: &str, _tag: ChildTag) -> Result<f64, AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn progress(&self, _name: &str, _tag: ChildTag) -> Result<f64, AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn clip_length(&self, _name: &str) -> Result<f64, AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn set_start_time(&mut self, _name: &str, _seconds: f64) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn skip_time(&mut self, _name: &str, _delta: f64, _tag: ChildTag) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn set_playback_direction(&mut self, _name: &str, _pitch: f32) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn register_child_at(&mut self, _name: &str, _position: Position) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn register_child_attached(
        &mut self,
        _name: &str,
        _target: ObjectId,
    ) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn play_at_position(&mut self, _name: &str, _position: Position) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn play_once_at_position(
        &mut self,
        _name: &str,
        _position: Position,
    ) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn play_attached(&mut self, _name: &str, _target: ObjectId) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn play_once_attached(&mut self, _name: &str, _target: ObjectId) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn deregister_child(&mut self, _name: &str, _tag: ChildTag) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn deregister_children(&mut self, _name: &str) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn subscribe_progress(
        &mut self,
        _name: &str,
        _progress: f64,
        _callback: ProgressCallback,
    ) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn unsubscribe_progress(&mut self, _name: &str, _progress: f64) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn subscribe_changed(
        &mut self,
        _name: &str,
        _callback: ChangedCallback,
    ) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn unsubscribe_changed(&mut self, _name: &str) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn lerp_volume(
        &mut self,
        _name: &str,
        _end: f32,
        _duration: f64,
        _granularity: u32,
    ) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn lerp_pitch(
        &mut self,
        _name: &str,
        _end: f32,
        _duration: f64,
        _granularity: u32,
    ) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn lerp_group_value(
        &mut self,
        _name: &str,
        _parameter: &str,
        _end: f32,
        _duration: f64,
        _granularity: u32,
    ) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn add_group(&mut self, _name: &str, _group: &str) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn remove_group(&mut self, _name: &str) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn set_group_value(
        &mut self,
        _name: &str,
        _parameter: &str,
        _value: f32,
    ) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn get_group_value(&self, _name: &str, _parameter: &str) -> Result<f32, AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn reset_group_value(&mut self, _name: &str, _parameter: &str) -> Result<(), AudioError> {
        Err(AudioError::NotInitialized)
    }

    fn tick(&mut self, _dt: f64) {}
}

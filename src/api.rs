//! Public capability surface of the orchestration layer.
//!
//! `AudioControl` is what hosts program against: the registry implements
//! it, [`crate::null::NullChannels`] provides the safe pre-initialization
//! fallback, and [`crate::diagnostics::logging::LoggingChannels`] wraps any
//! implementation without leaking behavior into the core.

use crate::backend::{AudioBackend, InstanceId, ObjectId, Position};
use crate::channel::ChildTag;
use crate::defs::ChannelDef;
use crate::error::AudioError;
use crate::params::ChannelParams;
use crate::progress::ProgressCallback;
use crate::registry::{ChangedCallback, ChannelRegistry};

pub trait AudioControl {
    // registration
    fn add_from_path(&mut self, name: &str, path: &str) -> Result<(), AudioError>;
    fn add_with_instance(&mut self, name: &str, primary: InstanceId) -> Result<(), AudioError>;
    fn add_from_defs(&mut self, defs: &[ChannelDef]) -> Result<(), AudioError>;
    fn remove_sound(&mut self, name: &str) -> Result<(), AudioError>;
    fn names(&self) -> Vec<String>;

    // parameters
    fn params(&self, name: &str) -> Result<ChannelParams, AudioError>;
    fn set_params(&mut self, name: &str, params: ChannelParams) -> Result<(), AudioError>;
    fn set_volume(&mut self, name: &str, volume: f32) -> Result<(), AudioError>;
    fn set_looping(&mut self, name: &str, looping: bool) -> Result<(), AudioError>;
    fn set_spatial_blend(&mut self, name: &str, blend: f32) -> Result<(), AudioError>;

    // transport
    fn play(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError>;
    fn play_once(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError>;
    fn play_delayed(&mut self, name: &str, delay: f64, tag: ChildTag) -> Result<(), AudioError>;
    fn play_scheduled(&mut self, name: &str, at: f64, tag: ChildTag) -> Result<(), AudioError>;
    fn play_at_timestamp(&mut self, name: &str, timestamp: f64) -> Result<(), AudioError>;
    fn stop(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError>;
    fn toggle_pause(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError>;
    fn toggle_mute(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError>;
    fn playback_position(&self, name: &str, tag: ChildTag) -> Result<f64, AudioError>;
    fn progress(&self, name: &str, tag: ChildTag) -> Result<f64, AudioError>;
    fn clip_length(&self, name: &str) -> Result<f64, AudioError>;
    fn set_start_time(&mut self, name: &str, seconds: f64) -> Result<(), AudioError>;
    fn skip_time(&mut self, name: &str, delta: f64, tag: ChildTag) -> Result<(), AudioError>;
    fn set_playback_direction(&mut self, name: &str, pitch: f32) -> Result<(), AudioError>;

    // children
    fn register_child_at(&mut self, name: &str, position: Position) -> Result<(), AudioError>;
    fn register_child_attached(&mut self, name: &str, target: ObjectId)
        -> Result<(), AudioError>;
    fn play_at_position(&mut self, name: &str, position: Position) -> Result<(), AudioError>;
    fn play_once_at_position(&mut self, name: &str, position: Position)
        -> Result<(), AudioError>;
    fn play_attached(&mut self, name: &str, target: ObjectId) -> Result<(), AudioError>;
    fn play_once_attached(&mut self, name: &str, target: ObjectId) -> Result<(), AudioError>;
    fn deregister_child(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError>;
    fn deregister_children(&mut self, name: &str) -> Result<(), AudioError>;

    // subscriptions
    fn subscribe_progress(
        &mut self,
        name: &str,
        progress: f64,
        callback: ProgressCallback,
    ) -> Result<(), AudioError>;
    fn unsubscribe_progress(&mut self, name: &str, progress: f64) -> Result<(), AudioError>;
    fn subscribe_changed(&mut self, name: &str, callback: ChangedCallback)
        -> Result<(), AudioError>;
    fn unsubscribe_changed(&mut self, name: &str) -> Result<(), AudioError>;

    // fades
    fn lerp_volume(
        &mut self,
        name: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError>;
    fn lerp_pitch(
        &mut self,
        name: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError>;
    fn lerp_group_value(
        &mut self,
        name: &str,
        parameter: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError>;

    // mixer
    fn add_group(&mut self, name: &str, group: &str) -> Result<(), AudioError>;
    fn remove_group(&mut self, name: &str) -> Result<(), AudioError>;
    fn set_group_value(&mut self, name: &str, parameter: &str, value: f32)
        -> Result<(), AudioError>;
    fn get_group_value(&self, name: &str, parameter: &str) -> Result<f32, AudioError>;
    fn reset_group_value(&mut self, name: &str, parameter: &str) -> Result<(), AudioError>;

    /// Advance the cooperative scheduler by `dt` seconds.
    fn tick(&mut self, dt: f64);
}

impl<B: AudioBackend> AudioControl for ChannelRegistry<B> {
    fn add_from_path(&mut self, name: &str, path: &str) -> Result<(), AudioError> {
        ChannelRegistry::add_from_path(self, name, path)
    }

    fn add_with_instance(&mut self, name: &str, primary: InstanceId) -> Result<(), AudioError> {
        ChannelRegistry::add_with_instance(self, name, primary)
    }

    fn add_from_defs(&mut self, defs: &[ChannelDef]) -> Result<(), AudioError> {
        ChannelRegistry::add_from_defs(self, defs)
    }

    fn remove_sound(&mut self, name: &str) -> Result<(), AudioError> {
        ChannelRegistry::remove_sound(self, name)
    }

    fn names(&self) -> Vec<String> {
        ChannelRegistry::names(self)
    }

    fn params(&self, name: &str) -> Result<ChannelParams, AudioError> {
        ChannelRegistry::params(self, name)
    }

    fn set_params(&mut self, name: &str, params: ChannelParams) -> Result<(), AudioError> {
        ChannelRegistry::set_params(self, name, params)
    }

    fn set_volume(&mut self, name: &str, volume: f32) -> Result<(), AudioError> {
        ChannelRegistry::set_volume(self, name, volume)
    }

    fn set_looping(&mut self, name: &str, looping: bool) -> Result<(), AudioError> {
        ChannelRegistry::set_looping(self, name, looping)
    }

    fn set_spatial_blend(&mut self, name: &str, blend: f32) -> Result<(), AudioError> {
        ChannelRegistry::set_spatial_blend(self, name, blend)
    }

    fn play(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        ChannelRegistry::play(self, name, tag)
    }

    fn play_once(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        ChannelRegistry::play_once(self, name, tag)
    }

    fn play_delayed(&mut self, name: &str, delay: f64, tag: ChildTag) -> Result<(), AudioError> {
        ChannelRegistry::play_delayed(self, name, delay, tag)
    }

    fn play_scheduled(&mut self, name: &str, at: f64, tag: ChildTag) -> Result<(), AudioError> {
        ChannelRegistry::play_scheduled(self, name, at, tag)
    }

    fn play_at_timestamp(&mut self, name: &str, timestamp: f64) -> Result<(), AudioError> {
        ChannelRegistry::play_at_timestamp(self, name, timestamp)
    }

    fn stop(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        ChannelRegistry::stop(self, name, tag)
    }

    fn toggle_pause(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        ChannelRegistry::toggle_pause(self, name, tag)
    }

    fn toggle_mute(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        ChannelRegistry::toggle_mute(self, name, tag)
    }

    fn playback_position(&self, name: &str, tag: ChildTag) -> Result<f64, AudioError> {
        ChannelRegistry::playback_position(self, name, tag)
    }

    fn progress(&self, name: &str, tag: ChildTag) -> Result<f64, AudioError> {
        ChannelRegistry::progress(self, name, tag)
    }

    fn clip_length(&self, name: &str) -> Result<f64, AudioError> {
        ChannelRegistry::clip_length(self, name)
    }

    fn set_start_time(&mut self, name: &str, seconds: f64) -> Result<(), AudioError> {
        ChannelRegistry::set_start_time(self, name, seconds)
    }

    fn skip_time(&mut self, name: &str, delta: f64, tag: ChildTag) -> Result<(), AudioError> {
        ChannelRegistry::skip_time(self, name, delta, tag)
    }

    fn set_playback_direction(&mut self, name: &str, pitch: f32) -> Result<(), AudioError> {
        ChannelRegistry::set_playback_direction(self, name, pitch)
    }

    fn register_child_at(&mut self, name: &str, position: Position) -> Result<(), AudioError> {
        ChannelRegistry::register_child_at(self, name, position)
    }

    fn register_child_attached(
        &mut self,
        name: &str,
        target: ObjectId,
    ) -> Result<(), AudioError> {
        ChannelRegistry::register_child_attached(self, name, target)
    }

    fn play_at_position(&mut self, name: &str, position: Position) -> Result<(), AudioError> {
        ChannelRegistry::play_at_position(self, name, position)
    }

    fn play_once_at_position(&mut self, name: &str, position: Position) -> Result<(), AudioError> {
        ChannelRegistry::play_once_at_position(self, name, position)
    }

    fn play_attached(&mut self, name: &str, target: ObjectId) -> Result<(), AudioError> {
        ChannelRegistry::play_attached(self, name, target)
    }

    fn play_once_attached(&mut self, name: &str, target: ObjectId) -> Result<(), AudioError> {
        ChannelRegistry::play_once_attached(self, name, target)
    }

    fn deregister_child(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        ChannelRegistry::deregister_child(self, name, tag)
    }

    fn deregister_children(&mut self, name: &str) -> Result<(), AudioError> {
        ChannelRegistry::deregister_children(self, name)
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

    fn subscribe_changed(
        &mut self,
        name: &str,
        callback: ChangedCallback,
    ) -> Result<(), AudioError> {
        ChannelRegistry::subscribe_changed(self, name, callback)
    }

    fn unsubscribe_changed(&mut self, name: &str) -> Result<(), AudioError> {
        ChannelRegistry::unsubscribe_changed(self, name)
    }

    fn lerp_volume(
        &mut self,
        name: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError> {
        ChannelRegistry::lerp_volume(self, name, end, duration, granularity)
    }

    fn lerp_pitch(
        &mut self,
        name: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError> {
        ChannelRegistry::lerp_pitch(self, name, end, duration, granularity)
    }

    fn lerp_group_value(
        &mut self,
        name: &str,
        parameter: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError> {
        ChannelRegistry::lerp_group_value(self, name, parameter, end, duration, granularity)
    }

    fn add_group(&mut self, name: &str, group: &str) -> Result<(), AudioError> {
        ChannelRegistry::add_group(self, name, group)
    }

    fn remove_group(&mut self, name: &str) -> Result<(), AudioError> {
        ChannelRegistry::remove_group(self, name)
    }

    fn set_group_value(
        &mut self,
        name: &str,
        parameter: &str,
        value: f32,
    ) -> Result<(), AudioError> {
        ChannelRegistry::set_group_value(self, name, parameter, value)
    }

    fn get_group_value(&self, name: &str, parameter: &str) -> Result<f32, AudioError> {
        ChannelRegistry::get_group_value(self, name, parameter)
    }

    fn reset_group_value(&mut self, name: &str, parameter: &str) -> Result<(), AudioError> {
        ChannelRegistry::reset_group_value(self, name, parameter)
    }

    fn tick(&mut self, dt: f64) {
        ChannelRegistry::tick(self, dt)
    }
}

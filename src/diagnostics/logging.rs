//! Pass-through decorator that records every call and failure.

use log::{debug, warn};

use crate::api::AudioControl;
use crate::backend::{InstanceId, ObjectId, Position};
use crate::channel::ChildTag;
use crate::defs::ChannelDef;
use crate::error::AudioError;
use crate::params::ChannelParams;
use crate::progress::ProgressCallback;
use crate::registry::ChangedCallback;

/// Logs entry and outcome of every [`AudioControl`] call, then delegates to
/// the wrapped implementation untouched.
pub struct LoggingChannels<A: AudioControl> {
    inner: A,
}

impl<A: AudioControl> LoggingChannels<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut A {
        &mut self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

fn traced<T>(op: &str, name: &str, result: Result<T, AudioError>) -> Result<T, AudioError> {
    match &result {
        Ok(_) => debug!("{}('{}') ok", op, name),
        Err(err) => warn!("{}('{}') failed: {}", op, name, err),
    }
    result
}

impl<A: AudioControl> AudioControl for LoggingChannels<A> {
    fn add_from_path(&mut self, name: &str, path: &str) -> Result<(), AudioError> {
        traced("add_from_path", name, self.inner.add_from_path(name, path))
    }

    fn add_with_instance(&mut self, name: &str, primary: InstanceId) -> Result<(), AudioError> {
        traced(
            "add_with_instance",
            name,
            self.inner.add_with_instance(name, primary),
        )
    }

    fn add_from_defs(&mut self, defs: &[ChannelDef]) -> Result<(), AudioError> {
        traced("add_from_defs", "*", self.inner.add_from_defs(defs))
    }

    fn remove_sound(&mut self, name: &str) -> Result<(), AudioError> {
        traced("remove_sound", name, self.inner.remove_sound(name))
    }

    fn names(&self) -> Vec<String> {
        self.inner.names()
    }

    fn params(&self, name: &str) -> Result<ChannelParams, AudioError> {
        self.inner.params(name)
    }

    fn set_params(&mut self, name: &str, params: ChannelParams) -> Result<(), AudioError> {
        traced("set_params", name, self.inner.set_params(name, params))
    }

    fn set_volume(&mut self, name: &str, volume: f32) -> Result<(), AudioError> {
        traced("set_volume", name, self.inner.set_volume(name, volume))
    }

    fn set_looping(&mut self, name: &str, looping: bool) -> Result<(), AudioError> {
        traced("set_looping", name, self.inner.set_looping(name, looping))
    }

    fn set_spatial_blend(&mut self, name: &str, blend: f32) -> Result<(), AudioError> {
        traced(
            "set_spatial_blend",
            name,
            self.inner.set_spatial_blend(name, blend),
        )
    }

    fn play(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        traced("play", name, self.inner.play(name, tag))
    }

    fn play_once(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        traced("play_once", name, self.inner.play_once(name, tag))
    }

    fn play_delayed(&mut self, name: &str, delay: f64, tag: ChildTag) -> Result<(), AudioError> {
        traced(
            "play_delayed",
            name,
            self.inner.play_delayed(name, delay, tag),
        )
    }

    fn play_scheduled(&mut self, name: &str, at: f64, tag: ChildTag) -> Result<(), AudioError> {
        traced(
            "play_scheduled",
            name,
            self.inner.play_scheduled(name, at, tag),
        )
    }

    fn play_at_timestamp(&mut self, name: &str, timestamp: f64) -> Result<(), AudioError> {
        traced(
            "play_at_timestamp",
            name,
            self.inner.play_at_timestamp(name, timestamp),
        )
    }

    fn stop(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        traced("stop", name, self.inner.stop(name, tag))
    }

    fn toggle_pause(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        traced("toggle_pause", name, self.inner.toggle_pause(name, tag))
    }

    fn toggle_mute(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        traced("toggle_mute", name, self.inner.toggle_mute(name, tag))
    }

    fn playback_position(&self, name: &str, tag: ChildTag) -> Result<f64, AudioError> {
        self.inner.playback_position(name, tag)
    }

    fn progress(&self, name: &str, tag: ChildTag) -> Result<f64, AudioError> {
        self.inner.progress(name, tag)
    }

    fn clip_length(&self, name: &str) -> Result<f64, AudioError> {
        self.inner.clip_length(name)
    }

    fn set_start_time(&mut self, name: &str, seconds: f64) -> Result<(), AudioError> {
        traced(
            "set_start_time",
            name,
            self.inner.set_start_time(name, seconds),
        )
    }

    fn skip_time(&mut self, name: &str, delta: f64, tag: ChildTag) -> Result<(), AudioError> {
        traced("skip_time", name, self.inner.skip_time(name, delta, tag))
    }

    fn set_playback_direction(&mut self, name: &str, pitch: f32) -> Result<(), AudioError> {
        traced(
            "set_playback_direction",
            name,
            self.inner.set_playback_direction(name, pitch),
        )
    }

    fn register_child_at(&mut self, name: &str, position: Position) -> Result<(), AudioError> {
        traced(
            "register_child_at",
            name,
            self.inner.register_child_at(name, position),
        )
    }

    fn register_child_attached(
        &mut self,
        name: &str,
        target: ObjectId,
    ) -> Result<(), AudioError> {
        traced(
            "register_child_attached",
            name,
            self.inner.register_child_attached(name, target),
        )
    }

    fn play_at_position(&mut self, name: &str, position: Position) -> Result<(), AudioError> {
        traced(
            "play_at_position",
            name,
            self.inner.play_at_position(name, position),
        )
    }

    fn play_once_at_position(&mut self, name: &str, position: Position) -> Result<(), AudioError> {
        traced(
            "play_once_at_position",
            name,
            self.inner.play_once_at_position(name, position),
        )
    }

    fn play_attached(&mut self, name: &str, target: ObjectId) -> Result<(), AudioError> {
        traced(
            "play_attached",
            name,
            self.inner.play_attached(name, target),
        )
    }

    fn play_once_attached(&mut self, name: &str, target: ObjectId) -> Result<(), AudioError> {
        traced(
            "play_once_attached",
            name,
            self.inner.play_once_attached(name, target),
        )
    }

    fn deregister_child(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        traced(
            "deregister_child",
            name,
            self.inner.deregister_child(name, tag),
        )
    }

    fn deregister_children(&mut self, name: &str) -> Result<(), AudioError> {
        traced(
            "deregister_children",
            name,
            self.inner.deregister_children(name),
        )
    }

    fn subscribe_progress(
        &mut self,
        name: &str,
        progress: f64,
        callback: ProgressCallback,
    ) -> Result<(), AudioError> {
        traced(
            "subscribe_progress",
            name,
            self.inner.subscribe_progress(name, progress, callback),
        )
    }

    fn unsubscribe_progress(&mut self, name: &str, progress: f64) -> Result<(), AudioError> {
        traced(
            "unsubscribe_progress",
            name,
            self.inner.unsubscribe_progress(name, progress),
        )
    }

    fn subscribe_changed(
        &mut self,
        name: &str,
        callback: ChangedCallback,
    ) -> Result<(), AudioError> {
        traced(
            "subscribe_changed",
            name,
            self.inner.subscribe_changed(name, callback),
        )
    }

    fn unsubscribe_changed(&mut self, name: &str) -> Result<(), AudioError> {
        traced(
            "unsubscribe_changed",
            name,
            self.inner.unsubscribe_changed(name),
        )
    }

    fn lerp_volume(
        &mut self,
        name: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError> {
        traced(
            "lerp_volume",
            name,
            self.inner.lerp_volume(name, end, duration, granularity),
        )
    }

    fn lerp_pitch(
        &mut self,
        name: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError> {
        traced(
            "lerp_pitch",
            name,
            self.inner.lerp_pitch(name, end, duration, granularity),
        )
    }

    fn lerp_group_value(
        &mut self,
        name: &str,
        parameter: &str,
        end: f32,
        duration: f64,
        granularity: u32,
    ) -> Result<(), AudioError> {
        traced(
            "lerp_group_value",
            name,
            self.inner
                .lerp_group_value(name, parameter, end, duration, granularity),
        )
    }

    fn add_group(&mut self, name: &str, group: &str) -> Result<(), AudioError> {
        traced("add_group", name, self.inner.add_group(name, group))
    }

    fn remove_group(&mut self, name: &str) -> Result<(), AudioError> {
        traced("remove_group", name, self.inner.remove_group(name))
    }

    fn set_group_value(
        &mut self,
        name: &str,
        parameter: &str,
        value: f32,
    ) -> Result<(), AudioError> {
        traced(
            "set_group_value",
            name,
            self.inner.set_group_value(name, parameter, value),
        )
    }

    fn get_group_value(&self, name: &str, parameter: &str) -> Result<f32, AudioError> {
        self.inner.get_group_value(name, parameter)
    }

    fn reset_group_value(&mut self, name: &str, parameter: &str) -> Result<(), AudioError> {
        traced(
            "reset_group_value",
            name,
            self.inner.reset_group_value(name, parameter),
        )
    }

    fn tick(&mut self, dt: f64) {
        self.inner.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::null::NullChannels;

    #[test]
    fn decorator_passes_results_through_unchanged() {
        let mut wrapped = LoggingChannels::new(NullChannels::new());
        assert_eq!(
            wrapped.play("bgm", ChildTag::Parent),
            Err(AudioError::NotInitialized)
        );
        assert!(wrapped.names().is_empty());
    }
}

//! Scripted in-memory backend used by the test suites.
//!
//! `MockBackend` implements [`AudioBackend`] over plain maps and a manual
//! clock: `advance(dt)` moves every playing instance by `dt * pitch`
//! seconds, wrapping or stopping at the clip boundary. Tests drive it in
//! lockstep with the registry's tick pump.

use std::collections::{HashMap, HashSet};

use crate::backend::{AudioBackend, InstanceId, ObjectId, Position};
use crate::params::ChannelParams;

pub const DEFAULT_CLIP_LENGTH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug)]
pub struct MockInstance {
    pub path: String,
    pub params: ChannelParams,
    pub clip_length: f64,
    /// Playback position in seconds.
    pub position: f64,
    pub state: PlayState,
    pub muted: bool,
    /// Set while a one-shot playback ignores the loop flag.
    pub one_shot: bool,
    /// Remaining seconds before a delayed play starts.
    pub delay: Option<f64>,
    pub position_3d: Option<Position>,
    pub attached_to: Option<ObjectId>,
    pub play_calls: u32,
}

impl MockInstance {
    fn new(path: &str, clip_length: f64) -> Self {
        Self {
            path: path.to_string(),
            params: ChannelParams::default(),
            clip_length,
            position: 0.0,
            state: PlayState::Stopped,
            muted: false,
            one_shot: false,
            delay: None,
            position_3d: None,
            attached_to: None,
            play_calls: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct MockBackend {
    next_id: u64,
    pub clock: f64,
    instances: HashMap<InstanceId, MockInstance>,
    /// (default, current) per exposed mixer parameter.
    exposed: HashMap<String, (f32, f32)>,
    objects: HashSet<ObjectId>,
    refused_paths: HashSet<String>,
    clip_length: f64,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            clip_length: DEFAULT_CLIP_LENGTH,
            ..Self::default()
        }
    }

    pub fn with_clip_length(clip_length: f64) -> Self {
        Self {
            clip_length,
            ..Self::default()
        }
    }

    /// Make `create_instance` fail for this path.
    pub fn refuse_path(&mut self, path: &str) {
        self.refused_paths.insert(path.to_string());
    }

    /// Register a scene object children may attach to.
    pub fn add_object(&mut self, target: ObjectId) {
        self.objects.insert(target);
    }

    /// Expose a mixer parameter with a default value.
    pub fn expose_parameter(&mut self, name: &str, default: f32) {
        self.exposed.insert(name.to_string(), (default, default));
    }

    /// All live instance ids, in creation order.
    pub fn ids(&self) -> Vec<InstanceId> {
        let mut ids: Vec<InstanceId> = self.instances.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Oldest live instance created from `path`.
    pub fn find(&self, path: &str) -> Option<InstanceId> {
        self.ids()
            .into_iter()
            .find(|id| self.instances[id].path == path)
    }

    pub fn instance(&self, id: InstanceId) -> &MockInstance {
        &self.instances[&id]
    }

    pub fn instance_mut(&mut self, id: InstanceId) -> &mut MockInstance {
        self.instances.get_mut(&id).unwrap()
    }

    /// Advance the scripted clock, moving every playing instance.
    pub fn advance(&mut self, dt: f64) {
        self.clock += dt;
        for instance in self.instances.values_mut() {
            if let Some(delay) = instance.delay.as_mut() {
                *delay -= dt;
                if *delay <= 0.0 {
                    instance.delay = None;
                    instance.state = PlayState::Playing;
                } else {
                    continue;
                }
            }
            if instance.state != PlayState::Playing || instance.clip_length <= 0.0 {
                continue;
            }

            instance.position += dt * instance.params.pitch as f64;
            let len = instance.clip_length;
            let loops = instance.params.looping && !instance.one_shot;

            if instance.params.pitch >= 0.0 && instance.position >= len {
                if loops {
                    instance.position %= len;
                } else {
                    instance.position = len;
                    instance.state = PlayState::Stopped;
                    instance.one_shot = false;
                }
            } else if instance.params.pitch < 0.0 && instance.position <= 0.0 {
                if loops {
                    instance.position += len;
                } else {
                    instance.position = 0.0;
                    instance.state = PlayState::Stopped;
                    instance.one_shot = false;
                }
            }
        }
    }
}

impl AudioBackend for MockBackend {
    fn create_instance(&mut self, path: &str) -> Option<InstanceId> {
        if path.is_empty() || self.refused_paths.contains(path) {
            return None;
        }
        self.next_id += 1;
        let id = InstanceId(self.next_id);
        self.instances
            .insert(id, MockInstance::new(path, self.clip_length));
        Some(id)
    }

    fn create_child_at(&mut self, source: InstanceId, position: Position) -> Option<InstanceId> {
        let (path, len) = {
            let source = self.instances.get(&source)?;
            (source.path.clone(), source.clip_length)
        };
        self.next_id += 1;
        let id = InstanceId(self.next_id);
        let mut instance = MockInstance::new(&path, len);
        instance.position_3d = Some(position);
        self.instances.insert(id, instance);
        Some(id)
    }

    fn create_child_attached(
        &mut self,
        source: InstanceId,
        target: ObjectId,
    ) -> Option<InstanceId> {
        if !self.objects.contains(&target) {
            return None;
        }
        let (path, len) = {
            let source = self.instances.get(&source)?;
            (source.path.clone(), source.clip_length)
        };
        self.next_id += 1;
        let id = InstanceId(self.next_id);
        let mut instance = MockInstance::new(&path, len);
        instance.attached_to = Some(target);
        self.instances.insert(id, instance);
        Some(id)
    }

    fn destroy_instance(&mut self, id: InstanceId) {
        self.instances.remove(&id);
    }

    fn is_alive(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    fn has_clip(&self, id: InstanceId) -> bool {
        self.instances
            .get(&id)
            .map(|i| i.clip_length > 0.0)
            .unwrap_or(false)
    }

    fn is_valid_object(&self, target: ObjectId) -> bool {
        self.objects.contains(&target)
    }

    fn move_instance(&mut self, id: InstanceId, position: Position) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.position_3d = Some(position);
        }
    }

    fn attach_instance(&mut self, id: InstanceId, target: ObjectId) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.attached_to = Some(target);
        }
    }

    fn play(&mut self, id: InstanceId) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.state = PlayState::Playing;
            instance.one_shot = false;
            instance.delay = None;
            instance.play_calls += 1;
        }
    }

    fn play_once(&mut self, id: InstanceId) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.state = PlayState::Playing;
            instance.one_shot = true;
            instance.delay = None;
            instance.play_calls += 1;
        }
    }

    fn play_delayed(&mut self, id: InstanceId, delay: f64) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.delay = Some(delay);
            instance.play_calls += 1;
        }
    }

    fn play_scheduled(&mut self, id: InstanceId, at: f64) {
        let delay = (at - self.clock).max(0.0);
        self.play_delayed(id, delay);
    }

    fn stop(&mut self, id: InstanceId) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.state = PlayState::Stopped;
            instance.one_shot = false;
            instance.delay = None;
            instance.position = 0.0;
        }
    }

    fn pause(&mut self, id: InstanceId) {
        if let Some(instance) = self.instances.get_mut(&id) {
            if instance.state == PlayState::Playing {
                instance.state = PlayState::Paused;
            }
        }
    }

    fn resume(&mut self, id: InstanceId) {
        if let Some(instance) = self.instances.get_mut(&id) {
            if instance.state == PlayState::Paused {
                instance.state = PlayState::Playing;
            }
        }
    }

    fn is_playing(&self, id: InstanceId) -> bool {
        self.instances
            .get(&id)
            .map(|i| i.state == PlayState::Playing && i.delay.is_none())
            .unwrap_or(false)
    }

    fn is_paused(&self, id: InstanceId) -> bool {
        self.instances
            .get(&id)
            .map(|i| i.state == PlayState::Paused)
            .unwrap_or(false)
    }

    fn set_mute(&mut self, id: InstanceId, mute: bool) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.muted = mute;
        }
    }

    fn is_muted(&self, id: InstanceId) -> bool {
        self.instances.get(&id).map(|i| i.muted).unwrap_or(false)
    }

    fn apply_params(&mut self, id: InstanceId, params: &ChannelParams) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.params = params.clone();
        }
    }

    fn playback_fraction(&self, id: InstanceId) -> f64 {
        self.instances
            .get(&id)
            .filter(|i| i.clip_length > 0.0)
            .map(|i| (i.position / i.clip_length).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }

    fn clip_length(&self, id: InstanceId) -> f64 {
        self.instances.get(&id).map(|i| i.clip_length).unwrap_or(0.0)
    }

    fn set_time_offset(&mut self, id: InstanceId, seconds: f64) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.position = seconds.clamp(0.0, instance.clip_length);
        }
    }

    fn exposed_parameter(&self, name: &str) -> Option<f32> {
        self.exposed.get(name).map(|&(_, current)| current)
    }

    fn set_exposed_parameter(&mut self, name: &str, value: f32) -> bool {
        match self.exposed.get_mut(name) {
            Some(entry) => {
                entry.1 = value;
                true
            }
            None => false,
        }
    }

    fn clear_exposed_parameter(&mut self, name: &str) -> bool {
        match self.exposed.get_mut(name) {
            Some(entry) => {
                entry.1 = entry.0;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_looping_playback() {
        let mut backend = MockBackend::with_clip_length(4.0);
        let id = backend.create_instance("clip").unwrap();
        let mut params = ChannelParams::default();
        params.looping = true;
        backend.apply_params(id, &params);

        backend.play(id);
        backend.advance(5.0);
        assert!(backend.is_playing(id));
        assert!((backend.instance(id).position - 1.0).abs() < 1e-9);
    }

    #[test]
    fn advance_stops_non_looping_playback_at_end() {
        let mut backend = MockBackend::with_clip_length(4.0);
        let id = backend.create_instance("clip").unwrap();
        backend.play(id);
        backend.advance(6.0);
        assert!(!backend.is_playing(id));
        assert!((backend.playback_fraction(id) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn delayed_play_starts_after_delay() {
        let mut backend = MockBackend::new();
        let id = backend.create_instance("clip").unwrap();
        backend.play_delayed(id, 2.0);
        assert!(!backend.is_playing(id));
        backend.advance(1.0);
        assert!(!backend.is_playing(id));
        backend.advance(1.5);
        assert!(backend.is_playing(id));
    }

    #[test]
    fn clear_exposed_parameter_restores_default() {
        let mut backend = MockBackend::new();
        backend.expose_parameter("MusicLowpass", 22_000.0);
        assert!(backend.set_exposed_parameter("MusicLowpass", 800.0));
        assert_eq!(backend.exposed_parameter("MusicLowpass"), Some(800.0));
        assert!(backend.clear_exposed_parameter("MusicLowpass"));
        assert_eq!(backend.exposed_parameter("MusicLowpass"), Some(22_000.0));
    }
}

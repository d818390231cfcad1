//! Capability interface for the low-level audio backend.
//!
//! The registry drives playback exclusively through [`AudioBackend`]; clip
//! decoding, mixing, and spatialization happen on the other side of this
//! trait. Hosts implement it over their engine's audio layer; tests use the
//! scripted backend in [`crate::test_data`].

use crate::params::ChannelParams;

/// Opaque handle to a backend playback instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// Opaque handle to a host scene object a child instance can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

/// World-space position for positional child instances.
pub type Position = [f32; 3];

/// Playback and mixer operations the orchestration layer consumes.
///
/// Mutating calls on dead instance ids must be no-ops; the registry checks
/// [`AudioBackend::is_alive`] before delegating, but watches may race a
/// removal within a tick.
pub trait AudioBackend {
    /// Create a primary playback instance from a clip path.
    fn create_instance(&mut self, path: &str) -> Option<InstanceId>;
    /// Create a child instance of `source` placed at a world position.
    fn create_child_at(&mut self, source: InstanceId, position: Position) -> Option<InstanceId>;
    /// Create a child instance of `source` parented under a scene object.
    fn create_child_attached(&mut self, source: InstanceId, target: ObjectId)
        -> Option<InstanceId>;
    /// Destroy an instance and release its resources.
    fn destroy_instance(&mut self, id: InstanceId);

    fn is_alive(&self, id: InstanceId) -> bool;
    fn has_clip(&self, id: InstanceId) -> bool;
    fn is_valid_object(&self, target: ObjectId) -> bool;

    /// Reposition an existing positional instance.
    fn move_instance(&mut self, id: InstanceId, position: Position);
    /// Re-parent an existing attached instance.
    fn attach_instance(&mut self, id: InstanceId, target: ObjectId);

    fn play(&mut self, id: InstanceId);
    /// Fire-and-forget playback that ignores the loop flag.
    fn play_once(&mut self, id: InstanceId);
    fn play_delayed(&mut self, id: InstanceId, delay: f64);
    fn play_scheduled(&mut self, id: InstanceId, at: f64);
    fn stop(&mut self, id: InstanceId);
    fn pause(&mut self, id: InstanceId);
    fn resume(&mut self, id: InstanceId);

    fn is_playing(&self, id: InstanceId) -> bool;
    fn is_paused(&self, id: InstanceId) -> bool;

    fn set_mute(&mut self, id: InstanceId, mute: bool);
    fn is_muted(&self, id: InstanceId) -> bool;

    /// Push the full scalar parameter set to an instance. Used both for the
    /// primary instance and for mirroring a parent onto its children; must
    /// never touch position or parent transform.
    fn apply_params(&mut self, id: InstanceId, params: &ChannelParams);

    /// Current playback position as a fraction of clip length in [0,1].
    fn playback_fraction(&self, id: InstanceId) -> f64;
    /// Clip length in seconds.
    fn clip_length(&self, id: InstanceId) -> f64;
    /// Reposition playback to an absolute clip time in seconds.
    fn set_time_offset(&mut self, id: InstanceId, seconds: f64);

    /// Read a mixer-exposed parameter, `None` when not exposed.
    fn exposed_parameter(&self, name: &str) -> Option<f32>;
    /// Write a mixer-exposed parameter; `false` when not exposed.
    fn set_exposed_parameter(&mut self, name: &str, value: f32) -> bool;
    /// Reset a mixer-exposed parameter to its default; `false` when not
    /// exposed.
    fn clear_exposed_parameter(&mut self, name: &str) -> bool;
}

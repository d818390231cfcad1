//! Child playback instances attached to a channel.

use std::collections::HashMap;

use log::debug;

use crate::backend::{AudioBackend, InstanceId, ObjectId, Position};
use crate::error::AudioError;
use crate::params::ChannelParams;

/// Role of a playback instance relative to its channel.
///
/// `Parent` addresses the primary instance and is never stored as a child
/// slot; the remaining variants each hold at most one live instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildTag {
    Parent,
    Positional,
    OneShotPositional,
    Attached,
    OneShotAttached,
}

/// Per-channel table of child instances, one slot per [`ChildTag`].
#[derive(Debug, Default)]
pub struct ChildRegistry {
    slots: HashMap<ChildTag, InstanceId>,
    ever_registered: bool,
}

impl ChildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a positional child in `slot`, or reuse and reposition the
    /// existing one to avoid backend instance churn.
    pub fn register_positional<B: AudioBackend>(
        &mut self,
        backend: &mut B,
        primary: InstanceId,
        params: &ChannelParams,
        slot: ChildTag,
        position: Position,
    ) -> Result<InstanceId, AudioError> {
        if params.spatial_blend <= 0.0 {
            return Err(AudioError::CanNotBe3D);
        }

        if let Some(&existing) = self.slots.get(&slot) {
            if backend.is_alive(existing) {
                backend.apply_params(existing, params);
                backend.move_instance(existing, position);
                return Ok(existing);
            }
            self.slots.remove(&slot);
        }

        let child = backend
            .create_child_at(primary, position)
            .ok_or(AudioError::MissingSource)?;
        backend.apply_params(child, params);
        self.slots.insert(slot, child);
        self.ever_registered = true;
        debug!("registered positional child {:?} in slot {:?}", child, slot);
        Ok(child)
    }

    /// Create an object-attached child in `slot`, or reuse and re-parent
    /// the existing one.
    pub fn register_attached<B: AudioBackend>(
        &mut self,
        backend: &mut B,
        primary: InstanceId,
        params: &ChannelParams,
        slot: ChildTag,
        target: ObjectId,
    ) -> Result<InstanceId, AudioError> {
        if params.spatial_blend <= 0.0 {
            return Err(AudioError::CanNotBe3D);
        }
        if !backend.is_valid_object(target) {
            return Err(AudioError::InvalidParent);
        }

        if let Some(&existing) = self.slots.get(&slot) {
            if backend.is_alive(existing) {
                backend.apply_params(existing, params);
                backend.attach_instance(existing, target);
                return Ok(existing);
            }
            self.slots.remove(&slot);
        }

        let child = backend
            .create_child_attached(primary, target)
            .ok_or(AudioError::MissingSource)?;
        backend.apply_params(child, params);
        self.slots.insert(slot, child);
        self.ever_registered = true;
        debug!("registered attached child {:?} in slot {:?}", child, slot);
        Ok(child)
    }

    /// Resolve a tag to the instance operations should dispatch to.
    pub fn resolve(&self, tag: ChildTag, primary: InstanceId) -> Result<InstanceId, AudioError> {
        if tag == ChildTag::Parent {
            return Ok(primary);
        }
        if !self.ever_registered {
            return Err(AudioError::MissingChildren);
        }
        self.slots
            .get(&tag)
            .copied()
            .ok_or(AudioError::InvalidChild)
    }

    /// Destroy the instance in `slot` and drop the bookkeeping.
    pub fn deregister<B: AudioBackend>(
        &mut self,
        backend: &mut B,
        slot: ChildTag,
    ) -> Result<(), AudioError> {
        if !self.ever_registered {
            return Err(AudioError::MissingChildren);
        }
        let child = self.slots.remove(&slot).ok_or(AudioError::InvalidChild)?;
        backend.destroy_instance(child);
        Ok(())
    }

    /// Destroy every live child instance.
    pub fn deregister_all<B: AudioBackend>(&mut self, backend: &mut B) {
        for (_, child) in self.slots.drain() {
            backend.destroy_instance(child);
        }
    }

    /// Mirror the parent's scalar parameters onto every live child.
    pub fn sync<B: AudioBackend>(&self, backend: &mut B, params: &ChannelParams) {
        for &child in self.slots.values() {
            backend.apply_params(child, params);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChildTag, InstanceId)> + '_ {
        self.slots.iter().map(|(&tag, &id)| (tag, id))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

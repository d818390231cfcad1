//! Positional and object-attached child registration and playback.

use crate::backend::{AudioBackend, InstanceId, ObjectId, Position};
use crate::channel::ChildTag;
use crate::error::AudioError;

use super::ChannelRegistry;

impl<B: AudioBackend> ChannelRegistry<B> {
    /// Register (or reposition) the channel's positional child.
    pub fn register_child_at(&mut self, name: &str, position: Position) -> Result<(), AudioError> {
        self.register_positional_slot(name, ChildTag::Positional, position)
            .map(|_| ())
    }

    /// Register (or re-parent) the channel's object-attached child.
    pub fn register_child_attached(
        &mut self,
        name: &str,
        target: ObjectId,
    ) -> Result<(), AudioError> {
        self.register_attached_slot(name, ChildTag::Attached, target)
            .map(|_| ())
    }

    /// Register the positional child and start it.
    pub fn play_at_position(&mut self, name: &str, position: Position) -> Result<(), AudioError> {
        let child = self.register_positional_slot(name, ChildTag::Positional, position)?;
        self.backend.play(child);
        Ok(())
    }

    /// One-shot playback at a position, through the dedicated one-shot slot
    /// so it never disturbs the looping positional child.
    pub fn play_once_at_position(
        &mut self,
        name: &str,
        position: Position,
    ) -> Result<(), AudioError> {
        let child = self.register_positional_slot(name, ChildTag::OneShotPositional, position)?;
        self.backend.play_once(child);
        Ok(())
    }

    /// Register the attached child and start it.
    pub fn play_attached(&mut self, name: &str, target: ObjectId) -> Result<(), AudioError> {
        let child = self.register_attached_slot(name, ChildTag::Attached, target)?;
        self.backend.play(child);
        Ok(())
    }

    /// One-shot playback parented under a scene object.
    pub fn play_once_attached(&mut self, name: &str, target: ObjectId) -> Result<(), AudioError> {
        let child = self.register_attached_slot(name, ChildTag::OneShotAttached, target)?;
        self.backend.play_once(child);
        Ok(())
    }

    /// Destroy the child in `tag`'s slot. `Parent` is not a child.
    pub fn deregister_child(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        if tag == ChildTag::Parent {
            return Err(AudioError::InvalidChild);
        }
        self.checked(name)?;
        let channel = self
            .channels
            .get_mut(name)
            .ok_or(AudioError::DoesNotExist)?;
        channel.children_mut().deregister(&mut self.backend, tag)
    }

    /// Destroy every child of the channel.
    pub fn deregister_children(&mut self, name: &str) -> Result<(), AudioError> {
        self.checked(name)?;
        let channel = self
            .channels
            .get_mut(name)
            .ok_or(AudioError::DoesNotExist)?;
        channel.children_mut().deregister_all(&mut self.backend);
        Ok(())
    }

    fn register_positional_slot(
        &mut self,
        name: &str,
        slot: ChildTag,
        position: Position,
    ) -> Result<InstanceId, AudioError> {
        self.checked(name)?;
        let channel = self
            .channels
            .get_mut(name)
            .ok_or(AudioError::DoesNotExist)?;
        let primary = channel.primary();
        let (children, params) = channel.children_and_params();
        children.register_positional(&mut self.backend, primary, params, slot, position)
    }

    fn register_attached_slot(
        &mut self,
        name: &str,
        slot: ChildTag,
        target: ObjectId,
    ) -> Result<InstanceId, AudioError> {
        self.checked(name)?;
        let channel = self
            .channels
            .get_mut(name)
            .ok_or(AudioError::DoesNotExist)?;
        let primary = channel.primary();
        let (children, params) = channel.children_and_params();
        children.register_attached(&mut self.backend, primary, params, slot, target)
    }
}

//! Top-level named-channel directory and tick pump.
//!
//! `ChannelRegistry` owns the backend handle, the channel table, and the
//! cooperative scheduler. The host constructs exactly one and passes it by
//! reference to consumers; `NullChannels` covers the time before that
//! happens. Operation groups live in sibling files, one `impl` block each,
//! mirroring how the playback controller is split.

mod events;
mod fades;
mod mixer;
mod spatial;
mod transport;

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::backend::{AudioBackend, InstanceId};
use crate::channel::{Channel, ChildTag};
use crate::defs::ChannelDef;
use crate::error::AudioError;
use crate::interp::{FadeTarget, FadeTask};
use crate::params::{ChangeFeed, ChannelParams};
use crate::progress::{passed, ProgressCallback, ProgressHit, ProgressResponse, ProgressWatch,
    WatchState};
use crate::sched::Scheduler;

/// Callback fired after a channel's parameters changed and its children
/// were re-synced.
pub type ChangedCallback = Box<dyn FnMut(&str)>;

/// Bound on re-sync rounds within one flush, in case a changed callback
/// keeps mutating parameters from inside its own notification.
const MAX_SYNC_PASSES: usize = 4;

pub struct ChannelRegistry<B: AudioBackend> {
    backend: B,
    channels: HashMap<String, Channel>,
    feed: ChangeFeed,
    scheduler: Option<Scheduler>,
    changed: HashMap<String, ChangedCallback>,
}

impl<B: AudioBackend> ChannelRegistry<B> {
    /// Registry with an attached scheduler context; the host must call
    /// [`tick`](Self::tick) once per frame for fades and watches to run.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            channels: HashMap::new(),
            feed: ChangeFeed::new(),
            scheduler: Some(Scheduler::new()),
            changed: HashMap::new(),
        }
    }

    /// Registry without a scheduler context. Immediate operations work;
    /// anything that would spawn a task returns
    /// [`AudioError::MissingParent`].
    pub fn detached(backend: B) -> Self {
        Self {
            scheduler: None,
            ..Self::new(backend)
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Registered channel names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Register a channel by creating a backend instance from a clip path.
    pub fn add_from_path(&mut self, name: &str, path: &str) -> Result<(), AudioError> {
        if self.channels.contains_key(name) {
            return Err(AudioError::AlreadyExists);
        }
        let primary = self
            .backend
            .create_instance(path)
            .ok_or(AudioError::InvalidPath)?;
        self.insert_channel(name, primary, ChannelParams::default());
        Ok(())
    }

    /// Register a channel over a pre-built backend instance.
    pub fn add_with_instance(&mut self, name: &str, primary: InstanceId) -> Result<(), AudioError> {
        if self.channels.contains_key(name) {
            return Err(AudioError::AlreadyExists);
        }
        if !self.backend.is_alive(primary) {
            return Err(AudioError::MissingSource);
        }
        self.insert_channel(name, primary, ChannelParams::default());
        Ok(())
    }

    /// Bulk-register channels from parsed definitions. Stops at the first
    /// failing entry; already-registered entries stay registered.
    pub fn add_from_defs(&mut self, defs: &[ChannelDef]) -> Result<(), AudioError> {
        for def in defs {
            if self.channels.contains_key(&def.name) {
                return Err(AudioError::AlreadyExists);
            }
            let primary = self
                .backend
                .create_instance(&def.path)
                .ok_or(AudioError::InvalidPath)?;
            self.insert_channel(&def.name, primary, def.params());
        }
        Ok(())
    }

    fn insert_channel(&mut self, name: &str, primary: InstanceId, params: ChannelParams) {
        self.backend.apply_params(primary, &params);
        let channel = Channel::new(name, primary, params, self.feed.clone());
        self.channels.insert(name.to_string(), channel);
        debug!("registered channel '{}' on {:?}", name, primary);
    }

    /// Remove a channel, destroying its primary instance, all children,
    /// and every pending watch and subscription.
    pub fn remove_sound(&mut self, name: &str) -> Result<(), AudioError> {
        let mut channel = self
            .channels
            .remove(name)
            .ok_or(AudioError::DoesNotExist)?;
        channel.children_mut().deregister_all(&mut self.backend);
        self.backend.destroy_instance(channel.primary());
        if let Some(sched) = self.scheduler.as_mut() {
            sched.watches.remove_channel(name);
        }
        self.changed.remove(name);
        debug!("removed channel '{}'", name);
        Ok(())
    }

    pub fn params(&self, name: &str) -> Result<ChannelParams, AudioError> {
        Ok(self.channel(name)?.params().clone())
    }

    pub fn set_params(&mut self, name: &str, params: ChannelParams) -> Result<(), AudioError> {
        self.checked_mut(name)?.store().set_all(params);
        self.flush_changes();
        Ok(())
    }

    pub fn set_volume(&mut self, name: &str, volume: f32) -> Result<(), AudioError> {
        self.checked_mut(name)?.store().set_volume(volume);
        self.flush_changes();
        Ok(())
    }

    pub fn set_looping(&mut self, name: &str, looping: bool) -> Result<(), AudioError> {
        self.checked_mut(name)?.store().set_looping(looping);
        self.flush_changes();
        Ok(())
    }

    pub fn set_spatial_blend(&mut self, name: &str, blend: f32) -> Result<(), AudioError> {
        self.checked_mut(name)?.store().set_spatial_blend(blend);
        self.flush_changes();
        Ok(())
    }

    /// Advance the cooperative scheduler by `dt` seconds: run due fade
    /// steps, poll progress watches, then re-sync any changed parameters.
    pub fn tick(&mut self, dt: f64) {
        let now = match self.scheduler.as_mut() {
            Some(sched) => sched.advance(dt),
            None => return,
        };
        self.step_fades(now);
        self.step_watches(now);
        self.flush_changes();
    }

    // ---- lookup helpers ----

    pub(crate) fn channel(&self, name: &str) -> Result<&Channel, AudioError> {
        self.channels.get(name).ok_or(AudioError::DoesNotExist)
    }

    pub(crate) fn channel_mut(&mut self, name: &str) -> Result<&mut Channel, AudioError> {
        self.channels.get_mut(name).ok_or(AudioError::DoesNotExist)
    }

    /// Resolve a channel and verify its primary instance is healthy.
    pub(crate) fn checked(&self, name: &str) -> Result<&Channel, AudioError> {
        let channel = self.channel(name)?;
        if !self.backend.is_alive(channel.primary()) {
            return Err(AudioError::MissingSource);
        }
        if !self.backend.has_clip(channel.primary()) {
            return Err(AudioError::MissingClip);
        }
        Ok(channel)
    }

    pub(crate) fn checked_mut(&mut self, name: &str) -> Result<&mut Channel, AudioError> {
        self.checked(name)?;
        self.channel_mut(name)
    }

    /// Health-checked dispatch target for a (channel, tag) pair.
    pub(crate) fn resolve_instance(
        &self,
        name: &str,
        tag: ChildTag,
    ) -> Result<InstanceId, AudioError> {
        let channel = self.checked(name)?;
        channel.children().resolve(tag, channel.primary())
    }

    pub(crate) fn scheduler_clock(&self) -> Result<f64, AudioError> {
        self.scheduler
            .as_ref()
            .map(|sched| sched.clock)
            .ok_or(AudioError::MissingParent)
    }

    pub(crate) fn push_fade(&mut self, task: FadeTask) -> Result<(), AudioError> {
        self.scheduler
            .as_mut()
            .ok_or(AudioError::MissingParent)?
            .fades
            .push(task);
        Ok(())
    }

    // ---- change propagation ----

    /// Drain the parameter change feed: push the parent's params to its
    /// primary instance, mirror them onto every child, then notify the
    /// channel's changed-subscriber.
    pub(crate) fn flush_changes(&mut self) {
        for _ in 0..MAX_SYNC_PASSES {
            let dirty = self.feed.drain();
            if dirty.is_empty() {
                return;
            }
            for name in dirty {
                if let Some(channel) = self.channels.get_mut(&name) {
                    let primary = channel.primary();
                    let (children, params) = channel.children_and_params();
                    self.backend.apply_params(primary, params);
                    children.sync(&mut self.backend, params);
                }
                if let Some(mut callback) = self.changed.remove(&name) {
                    callback(&name);
                    self.changed.entry(name.clone()).or_insert(callback);
                }
            }
        }
        if !self.feed.is_empty() {
            warn!(
                "parameter feed still dirty after {} sync passes",
                MAX_SYNC_PASSES
            );
        }
    }

    // ---- fade stepping ----

    fn step_fades(&mut self, now: f64) {
        let mut fades = match self.scheduler.as_mut() {
            Some(sched) => std::mem::take(&mut sched.fades),
            None => return,
        };
        let mut keep = Vec::with_capacity(fades.len());
        for mut task in fades.drain(..) {
            let mut dead = false;
            while task.step_due(now) {
                let snap = task.consume_step();
                if !self.apply_fade_value(&task, snap) {
                    dead = true;
                    break;
                }
            }
            if !dead && task.steps_left > 0 {
                keep.push(task);
            }
        }
        if let Some(sched) = self.scheduler.as_mut() {
            keep.append(&mut sched.fades);
            sched.fades = keep;
        }
    }

    /// Write one fade step (or the exact end value on `snap`). Returns
    /// false when the target vanished and the fade must be dropped.
    fn apply_fade_value(&mut self, task: &FadeTask, snap: bool) -> bool {
        match &task.target {
            FadeTarget::Volume => {
                let Ok(channel) = self.checked_mut(&task.channel) else {
                    return false;
                };
                let value = if snap {
                    task.end
                } else {
                    channel.params().volume + task.step
                };
                channel.store().set_volume(value);
                true
            }
            FadeTarget::Pitch => {
                let Ok(channel) = self.checked_mut(&task.channel) else {
                    return false;
                };
                let value = if snap {
                    task.end
                } else {
                    channel.params().pitch + task.step
                };
                channel.store().set_pitch(value);
                true
            }
            FadeTarget::Exposed(parameter) => {
                let value = if snap {
                    task.end
                } else {
                    match self.backend.exposed_parameter(parameter) {
                        Some(current) => current + task.step,
                        None => return false,
                    }
                };
                self.backend.set_exposed_parameter(parameter, value)
            }
        }
    }

    // ---- watch stepping ----

    fn step_watches(&mut self, now: f64) {
        let names = match self.scheduler.as_mut() {
            Some(sched) => {
                sched.watches.wake_due(now);
                sched.watches.channel_names()
            }
            None => return,
        };

        for name in names {
            // Each watch fires at most once per tick, so a RearmImmediate
            // response cannot spin this loop forever.
            let mut fired: HashSet<u64> = HashSet::new();
            loop {
                let Some((threshold, tag)) = self.next_due_watch(&name, &fired) else {
                    break;
                };
                let Some(watch) = self
                    .scheduler
                    .as_mut()
                    .and_then(|sched| sched.watches.take(&name, threshold))
                else {
                    break;
                };
                fired.insert(threshold.to_bits());

                let hit = ProgressHit {
                    name: name.clone(),
                    progress: threshold,
                    tag,
                };
                let ProgressWatch {
                    progress,
                    mut callback,
                    ..
                } = watch;
                let response = callback(self, &hit);
                match response {
                    ProgressResponse::Unsub => {}
                    ProgressResponse::RearmImmediate => {
                        self.restore_watch(&name, progress, WatchState::Armed, callback);
                    }
                    ProgressResponse::RearmAfterRemaining => {
                        let state = match self.remaining_play_time(&name, tag) {
                            Some(remaining) => WatchState::Sleeping {
                                until: now + remaining,
                            },
                            None => WatchState::Armed,
                        };
                        self.restore_watch(&name, progress, state, callback);
                    }
                }
            }
        }
    }

    /// First armed watch of `name` whose threshold a playing instance has
    /// passed, skipping watches already fired this tick.
    fn next_due_watch(&self, name: &str, fired: &HashSet<u64>) -> Option<(f64, ChildTag)> {
        let sched = self.scheduler.as_ref()?;
        let channel = self.channels.get(name)?;
        let pitch = channel.params().pitch;
        for threshold in sched.watches.armed_thresholds(name) {
            if fired.contains(&threshold.to_bits()) {
                continue;
            }
            if let Some(tag) = self.crossing_tag(channel, threshold, pitch) {
                return Some((threshold, tag));
            }
        }
        None
    }

    /// Which instance crossed the threshold; children win over the parent.
    /// A stopped instance never achieves progress.
    fn crossing_tag(&self, channel: &Channel, threshold: f64, pitch: f32) -> Option<ChildTag> {
        for (tag, id) in channel.children().iter() {
            if self.backend.is_playing(id)
                && passed(self.backend.playback_fraction(id), threshold, pitch)
            {
                return Some(tag);
            }
        }
        let primary = channel.primary();
        if self.backend.is_playing(primary)
            && passed(self.backend.playback_fraction(primary), threshold, pitch)
        {
            return Some(ChildTag::Parent);
        }
        None
    }

    /// Put a detached watch back unless its channel is gone or the
    /// callback replaced it.
    fn restore_watch(
        &mut self,
        name: &str,
        progress: f64,
        state: WatchState,
        callback: ProgressCallback,
    ) {
        if !self.channels.contains_key(name) {
            return;
        }
        if let Some(sched) = self.scheduler.as_mut() {
            sched.watches.restore(
                name,
                ProgressWatch {
                    progress,
                    state,
                    callback,
                },
            );
        }
    }

    /// Seconds until the instance that triggered `tag` finishes its current
    /// loop iteration, given clip length, offset, and pitch.
    fn remaining_play_time(&self, name: &str, tag: ChildTag) -> Option<f64> {
        let channel = self.channels.get(name)?;
        let mut id = channel
            .children()
            .resolve(tag, channel.primary())
            .unwrap_or(channel.primary());
        if !self.backend.is_alive(id) {
            id = channel.primary();
        }
        if !self.backend.is_alive(id) {
            return None;
        }
        let length = self.backend.clip_length(id);
        let fraction = self.backend.playback_fraction(id);
        let pitch = channel.params().pitch;
        let speed = (pitch.abs() as f64).max(1e-6);
        let remaining = if pitch >= 0.0 {
            length * (1.0 - fraction)
        } else {
            length * fraction
        };
        Some(remaining / speed)
    }
}

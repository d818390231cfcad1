//! Progress watches: callbacks fired when playback crosses a fractional
//! threshold.
//!
//! Each watch walks `Idle -> Armed -> Fired` per crossing; the callback's
//! [`ProgressResponse`] decides whether it re-arms (immediately or after the
//! remaining clip duration) or is removed. The registry detaches a watch
//! before invoking its callback, so callbacks may freely unsubscribe or
//! replace the very watch that is firing.

use std::collections::HashMap;

use crate::channel::ChildTag;
use crate::error::AudioError;

/// Highest threshold a forward-playing watch can reliably detect. Polling
/// happens once per tick, so anything closer to the clip boundary may be
/// overshot before it is observed.
pub const MAX_PROGRESS: f64 = 0.99;
/// Lowest threshold a reverse-playing watch can reliably detect.
pub const MIN_PROGRESS: f64 = 0.01;

/// What a firing callback wants done with its watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressResponse {
    /// Remove the watch; it never fires again.
    Unsub,
    /// Re-poll immediately. Meant for callbacks that rewound playback, e.g.
    /// looping back to a start point.
    RearmImmediate,
    /// Sleep for the instance's remaining clip duration, then re-poll. Fires
    /// once per loop iteration at the same relative point.
    RearmAfterRemaining,
}

/// Details of a threshold crossing passed to the callback.
#[derive(Debug, Clone)]
pub struct ProgressHit {
    pub name: String,
    pub progress: f64,
    /// Which instance actually crossed; `Parent` when it was the primary.
    pub tag: ChildTag,
}

/// Re-entry surface available to a firing progress callback.
///
/// Restricting callbacks to this trait keeps the firing path object-safe
/// and makes the legal re-entrant mutations explicit.
pub trait ProgressContext {
    fn stop(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError>;
    fn set_start_time(&mut self, name: &str, seconds: f64) -> Result<(), AudioError>;
    fn is_looping(&self, name: &str) -> Result<bool, AudioError>;
    fn subscribe_progress(
        &mut self,
        name: &str,
        progress: f64,
        callback: ProgressCallback,
    ) -> Result<(), AudioError>;
    fn unsubscribe_progress(&mut self, name: &str, progress: f64) -> Result<(), AudioError>;
}

pub type ProgressCallback =
    Box<dyn FnMut(&mut dyn ProgressContext, &ProgressHit) -> ProgressResponse>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum WatchState {
    Armed,
    Sleeping { until: f64 },
}

/// An armed subscription awaiting its threshold crossing.
pub struct ProgressWatch {
    pub progress: f64,
    pub(crate) state: WatchState,
    pub(crate) callback: ProgressCallback,
}

impl std::fmt::Debug for ProgressWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressWatch")
            .field("progress", &self.progress)
            .field("state", &self.state)
            .finish()
    }
}

/// Reject thresholds outside [0,1] or unreachable for the playback
/// direction implied by the pitch sign.
pub fn validate_threshold(progress: f64, pitch: f32) -> Result<(), AudioError> {
    if !(0.0..=1.0).contains(&progress) {
        return Err(AudioError::InvalidProgress);
    }
    if pitch >= 0.0 && progress > MAX_PROGRESS {
        return Err(AudioError::InvalidProgress);
    }
    if pitch < 0.0 && progress < MIN_PROGRESS {
        return Err(AudioError::InvalidProgress);
    }
    Ok(())
}

/// True when `fraction` has passed `threshold` in the direction implied by
/// the pitch sign.
pub fn passed(fraction: f64, threshold: f64, pitch: f32) -> bool {
    if pitch >= 0.0 {
        fraction >= threshold
    } else {
        fraction <= threshold
    }
}

/// Per-channel watch lists keyed by (channel name, exact fraction).
#[derive(Debug, Default)]
pub struct WatchTable {
    watches: HashMap<String, Vec<ProgressWatch>>,
}

impl WatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        name: &str,
        progress: f64,
        callback: ProgressCallback,
    ) -> Result<(), AudioError> {
        let list = self.watches.entry(name.to_string()).or_default();
        if list.iter().any(|w| w.progress.to_bits() == progress.to_bits()) {
            return Err(AudioError::AlreadySubscribed);
        }
        list.push(ProgressWatch {
            progress,
            state: WatchState::Armed,
            callback,
        });
        Ok(())
    }

    pub fn unsubscribe(&mut self, name: &str, progress: f64) -> Result<(), AudioError> {
        let list = self
            .watches
            .get_mut(name)
            .ok_or(AudioError::NotSubscribed)?;
        let index = list
            .iter()
            .position(|w| w.progress.to_bits() == progress.to_bits())
            .ok_or(AudioError::NotSubscribed)?;
        list.remove(index);
        if list.is_empty() {
            self.watches.remove(name);
        }
        Ok(())
    }

    pub fn contains(&self, name: &str, progress: f64) -> bool {
        self.watches
            .get(name)
            .map(|list| {
                list.iter()
                    .any(|w| w.progress.to_bits() == progress.to_bits())
            })
            .unwrap_or(false)
    }

    /// Detach one watch so its callback can run against `&mut` registry.
    pub fn take(&mut self, name: &str, progress: f64) -> Option<ProgressWatch> {
        let list = self.watches.get_mut(name)?;
        let index = list
            .iter()
            .position(|w| w.progress.to_bits() == progress.to_bits())?;
        let watch = list.remove(index);
        if list.is_empty() {
            self.watches.remove(name);
        }
        Some(watch)
    }

    /// Put a detached watch back, unless the callback re-subscribed the
    /// same slot while it was out.
    pub fn restore(&mut self, name: &str, watch: ProgressWatch) {
        if self.contains(name, watch.progress) {
            return;
        }
        self.watches.entry(name.to_string()).or_default().push(watch);
    }

    /// Move sleeping watches whose deadline elapsed back to armed.
    pub fn wake_due(&mut self, now: f64) {
        for list in self.watches.values_mut() {
            for watch in list.iter_mut() {
                if let WatchState::Sleeping { until } = watch.state {
                    if now + 1e-9 >= until {
                        watch.state = WatchState::Armed;
                    }
                }
            }
        }
    }

    /// Drop every watch of a channel. Used when the channel is removed.
    pub fn remove_channel(&mut self, name: &str) {
        self.watches.remove(name);
    }

    pub fn channel_names(&self) -> Vec<String> {
        self.watches.keys().cloned().collect()
    }

    /// Armed thresholds for one channel, in registration order.
    pub fn armed_thresholds(&self, name: &str) -> Vec<f64> {
        self.watches
            .get(name)
            .map(|list| {
                list.iter()
                    .filter(|w| w.state == WatchState::Armed)
                    .map(|w| w.progress)
                    .collect()
            })
            .unwrap_or_default()
    }
}

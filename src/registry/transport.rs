//! Transport operations: play/stop/pause/mute variants, timing queries,
//! and playback direction.

use crate::backend::AudioBackend;
use crate::channel::ChildTag;
use crate::error::AudioError;
use crate::progress::{ProgressResponse, MAX_PROGRESS, MIN_PROGRESS};

use super::ChannelRegistry;

impl<B: AudioBackend> ChannelRegistry<B> {
    /// Start playback of the tagged instance. A pending start time is
    /// applied to the primary instance before it starts.
    pub fn play(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        let id = self.resolve_instance(name, tag)?;
        if tag == ChildTag::Parent {
            let start = self.channel(name)?.start_time();
            if start > 0.0 {
                self.backend.set_time_offset(id, start);
            }
        }
        self.backend.play(id);
        Ok(())
    }

    /// Fire-and-forget playback ignoring the loop flag.
    pub fn play_once(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        let id = self.resolve_instance(name, tag)?;
        self.backend.play_once(id);
        Ok(())
    }

    pub fn play_delayed(&mut self, name: &str, delay: f64, tag: ChildTag) -> Result<(), AudioError> {
        if delay < 0.0 {
            return Err(AudioError::InvalidTime);
        }
        let id = self.resolve_instance(name, tag)?;
        self.backend.play_delayed(id, delay);
        Ok(())
    }

    pub fn play_scheduled(&mut self, name: &str, at: f64, tag: ChildTag) -> Result<(), AudioError> {
        if at < 0.0 {
            return Err(AudioError::InvalidTime);
        }
        let id = self.resolve_instance(name, tag)?;
        self.backend.play_scheduled(id, at);
        Ok(())
    }

    /// Play once from `timestamp` without permanently shifting where later
    /// plays start. Arms a one-shot watch near the clip boundary whose
    /// callback stops non-looping playback and resets the start time to 0.
    pub fn play_at_timestamp(&mut self, name: &str, timestamp: f64) -> Result<(), AudioError> {
        self.checked(name)?;
        self.scheduler_clock()?;
        self.set_start_time(name, timestamp)?;

        let pitch = self.channel(name)?.params().pitch;
        let boundary = if pitch >= 0.0 { MAX_PROGRESS } else { MIN_PROGRESS };
        // Replace a boundary watch left over from an earlier call.
        let _ = self.unsubscribe_progress(name, boundary);
        self.subscribe_progress(
            name,
            boundary,
            Box::new(|ctx, hit| {
                if !ctx.is_looping(&hit.name).unwrap_or(false) {
                    let _ = ctx.stop(&hit.name, ChildTag::Parent);
                }
                let _ = ctx.set_start_time(&hit.name, 0.0);
                ProgressResponse::Unsub
            }),
        )?;
        self.play(name, ChildTag::Parent)
    }

    pub fn stop(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        let id = self.resolve_instance(name, tag)?;
        self.backend.stop(id);
        Ok(())
    }

    /// Pause the tagged instance if playing, resume it if paused.
    pub fn toggle_pause(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        let id = self.resolve_instance(name, tag)?;
        if self.backend.is_paused(id) {
            self.backend.resume(id);
        } else {
            self.backend.pause(id);
        }
        Ok(())
    }

    pub fn toggle_mute(&mut self, name: &str, tag: ChildTag) -> Result<(), AudioError> {
        let id = self.resolve_instance(name, tag)?;
        let muted = self.backend.is_muted(id);
        self.backend.set_mute(id, !muted);
        Ok(())
    }

    /// Current playback position of the tagged instance in seconds.
    pub fn playback_position(&self, name: &str, tag: ChildTag) -> Result<f64, AudioError> {
        let id = self.resolve_instance(name, tag)?;
        Ok(self.backend.playback_fraction(id) * self.backend.clip_length(id))
    }

    /// Current playback progress of the tagged instance in [0,1].
    pub fn progress(&self, name: &str, tag: ChildTag) -> Result<f64, AudioError> {
        let id = self.resolve_instance(name, tag)?;
        Ok(self.backend.playback_fraction(id))
    }

    /// Clip length of the primary instance in seconds.
    pub fn clip_length(&self, name: &str) -> Result<f64, AudioError> {
        let channel = self.checked(name)?;
        Ok(self.backend.clip_length(channel.primary()))
    }

    /// Record where the next `play` of the primary instance starts.
    pub fn set_start_time(&mut self, name: &str, seconds: f64) -> Result<(), AudioError> {
        let channel = self.checked(name)?;
        let length = self.backend.clip_length(channel.primary());
        if !(0.0..=length).contains(&seconds) {
            return Err(AudioError::InvalidTime);
        }
        self.channel_mut(name)?.set_start_time(seconds);
        Ok(())
    }

    /// Move the tagged instance forward or backward by `delta` seconds,
    /// clamped to the clip.
    pub fn skip_time(&mut self, name: &str, delta: f64, tag: ChildTag) -> Result<(), AudioError> {
        let id = self.resolve_instance(name, tag)?;
        let length = self.backend.clip_length(id);
        let position = self.backend.playback_fraction(id) * length;
        let target = (position + delta).clamp(0.0, length);
        self.backend.set_time_offset(id, target);
        Ok(())
    }

    /// Set the playback pitch, including direction. A negative pitch plays
    /// backward from wherever "now" is, so the primary instance is also
    /// repositioned to the last point the progress detector can observe.
    pub fn set_playback_direction(&mut self, name: &str, pitch: f32) -> Result<(), AudioError> {
        let primary = self.checked(name)?.primary();
        self.channel_mut(name)?.store().set_pitch(pitch);
        if pitch < 0.0 {
            let length = self.backend.clip_length(primary);
            self.backend.set_time_offset(primary, length * MAX_PROGRESS);
        }
        self.flush_changes();
        Ok(())
    }
}

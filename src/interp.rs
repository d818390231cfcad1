//! Stepped-value interpolation for volume, pitch, and mixer fades.
//!
//! A fade is planned up front (validation, step delta, step interval) and
//! then advanced by the registry's tick pump. After the final step the value
//! snaps to the exact end value so accumulated floating-point drift never
//! survives a fade.

use crate::error::AudioError;

/// Values closer than this are considered already equal.
pub const LERP_EPSILON: f32 = 1e-4;

/// Which value a fade writes on every step.
#[derive(Debug, Clone, PartialEq)]
pub enum FadeTarget {
    Volume,
    Pitch,
    /// Mixer-exposed parameter; steps round-trip through the backend
    /// accessor instead of the local parameter store.
    Exposed(String),
}

/// A planned fade being advanced by the tick pump.
#[derive(Debug)]
pub struct FadeTask {
    pub channel: String,
    pub target: FadeTarget,
    pub end: f32,
    pub step: f32,
    pub steps_left: u32,
    pub interval: f64,
    pub next_step_at: f64,
}

impl FadeTask {
    /// Validate and lay out a fade.
    ///
    /// `granularity` is the number of discrete steps; zero is rejected with
    /// [`AudioError::InvalidGranularity`]. A `current` already within
    /// [`LERP_EPSILON`] of `end` is rejected with
    /// [`AudioError::InvalidEndValue`] and spawns nothing.
    pub fn plan(
        channel: &str,
        target: FadeTarget,
        current: f32,
        end: f32,
        duration: f64,
        granularity: u32,
        now: f64,
    ) -> Result<Self, AudioError> {
        if granularity < 1 {
            return Err(AudioError::InvalidGranularity);
        }
        if (end - current).abs() < LERP_EPSILON {
            return Err(AudioError::InvalidEndValue);
        }

        let step = (end - current) / granularity as f32;
        let interval = duration / granularity as f64;
        Ok(Self {
            channel: channel.to_string(),
            target,
            end,
            step,
            steps_left: granularity,
            interval,
            next_step_at: now + interval,
        })
    }

    /// True once a step interval has elapsed.
    pub fn step_due(&self, now: f64) -> bool {
        self.steps_left > 0 && now + 1e-9 >= self.next_step_at
    }

    /// Consume one step; returns true when this was the final step and the
    /// caller must snap to [`FadeTask::end`].
    pub fn consume_step(&mut self) -> bool {
        self.steps_left -= 1;
        self.next_step_at += self.interval;
        self.steps_left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_granularity_is_rejected() {
        let result = FadeTask::plan("bgm", FadeTarget::Volume, 0.0, 1.0, 1.0, 0, 0.0);
        assert_eq!(result.unwrap_err(), AudioError::InvalidGranularity);
    }

    #[test]
    fn equal_end_value_is_rejected() {
        let result = FadeTask::plan("bgm", FadeTarget::Volume, 0.5, 0.5, 1.0, 5, 0.0);
        assert_eq!(result.unwrap_err(), AudioError::InvalidEndValue);

        let result = FadeTask::plan(
            "bgm",
            FadeTarget::Volume,
            0.5,
            0.5 + LERP_EPSILON / 2.0,
            1.0,
            5,
            0.0,
        );
        assert_eq!(result.unwrap_err(), AudioError::InvalidEndValue);
    }

    #[test]
    fn plan_divides_distance_and_duration_evenly() {
        let task = FadeTask::plan("bgm", FadeTarget::Volume, 0.0, 1.0, 2.0, 5, 0.0).unwrap();
        assert!((task.step - 0.2).abs() < 1e-6);
        assert!((task.interval - 0.4).abs() < 1e-9);
        assert_eq!(task.steps_left, 5);
        assert!((task.next_step_at - 0.4).abs() < 1e-9);
    }

    #[test]
    fn steps_fire_per_interval_and_finish_exact() {
        let mut task = FadeTask::plan("bgm", FadeTarget::Volume, 0.0, 1.0, 1.0, 4, 0.0).unwrap();

        assert!(!task.step_due(0.1));
        assert!(task.step_due(0.25));

        let mut finished = false;
        for _ in 0..4 {
            finished = task.consume_step();
        }
        assert!(finished);
        assert_eq!(task.steps_left, 0);
        assert!(!task.step_due(10.0));
    }
}

use std::fmt::{Display, Formatter};

/// Result codes returned by every registry operation.
///
/// Errors are plain values; no operation panics or partially applies its
/// effect on failure. Validation always precedes mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioError {
    /// No channel is registered under the given name.
    DoesNotExist,
    /// A channel with the given name is already registered.
    AlreadyExists,
    /// The backend could not create a playback instance from the path.
    InvalidPath,
    /// Lerp target value equals the current value (within epsilon).
    InvalidEndValue,
    /// Lerp granularity of zero steps.
    InvalidGranularity,
    /// Timestamp outside the clip's duration.
    InvalidTime,
    /// Progress threshold outside [0,1] or unreachable for the current
    /// playback direction.
    InvalidProgress,
    /// The mixer does not expose a parameter under that name.
    MixerNotExposed,
    /// The channel's primary backend instance no longer exists.
    MissingSource,
    /// The channel has no mixer group assigned.
    MissingMixerGroup,
    /// The channel's spatial blend marks it as a 2D source.
    CanNotBe3D,
    /// The registry has not been initialized (null-object fallback).
    NotInitialized,
    /// The backend instance has no clip loaded.
    MissingClip,
    /// No scheduler context is attached, so no task can be spawned.
    MissingParent,
    /// The attach target object is not known to the backend.
    InvalidParent,
    /// A progress watch for this (channel, fraction) pair already exists.
    AlreadySubscribed,
    /// No progress watch exists for this (channel, fraction) pair.
    NotSubscribed,
    /// The channel never registered any child instance.
    MissingChildren,
    /// The requested child slot has no live backing instance.
    InvalidChild,
}

impl Display for AudioError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::DoesNotExist => "channel does not exist",
            Self::AlreadyExists => "channel already exists",
            Self::InvalidPath => "invalid clip path",
            Self::InvalidEndValue => "lerp end value equals current value",
            Self::InvalidGranularity => "lerp granularity must be at least 1",
            Self::InvalidTime => "timestamp outside clip duration",
            Self::InvalidProgress => "progress threshold unreachable",
            Self::MixerNotExposed => "mixer parameter not exposed",
            Self::MissingSource => "backend instance missing",
            Self::MissingMixerGroup => "channel has no mixer group",
            Self::CanNotBe3D => "channel is a 2D source",
            Self::NotInitialized => "registry not initialized",
            Self::MissingClip => "backend instance has no clip",
            Self::MissingParent => "no scheduler context attached",
            Self::InvalidParent => "invalid attach target",
            Self::AlreadySubscribed => "progress watch already registered",
            Self::NotSubscribed => "no such progress watch",
            Self::MissingChildren => "channel has no registered children",
            Self::InvalidChild => "child slot has no live instance",
        };
        write!(f, "{}", text)
    }
}

impl std::error::Error for AudioError {}

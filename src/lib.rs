//! # Conductor Audio
//!
//! Channel-oriented orchestration layer between game logic and a low-level
//! audio backend. Callers register named playback channels, drive their
//! transport, attach positional or object-bound child instances, fade
//! parameters over time, and subscribe callbacks that fire when playback
//! crosses a fractional progress point.
//!
//! The backend itself (clip decoding, mixing, spatialization) stays behind
//! the [`backend::AudioBackend`] trait; everything here is cooperative and
//! single-threaded, driven by the host calling
//! [`registry::ChannelRegistry::tick`] once per frame.

pub mod api;
pub mod backend;
pub mod channel;
pub mod defs;
pub mod diagnostics;
mod error;
pub mod interp;
pub mod null;
pub mod params;
pub mod progress;
pub mod registry;
pub mod sched;
pub mod test_data;

pub use api::AudioControl;
pub use backend::{AudioBackend, InstanceId, ObjectId, Position};
pub use channel::ChildTag;
pub use diagnostics::logging::LoggingChannels;
pub use error::AudioError;
pub use null::NullChannels;
pub use params::{ChannelParams, RolloffMode};
pub use progress::{ProgressCallback, ProgressContext, ProgressHit, ProgressResponse};
pub use registry::{ChangedCallback, ChannelRegistry};

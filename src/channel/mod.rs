//! A named, independently controllable playback unit.

pub mod children;

use crate::backend::InstanceId;
use crate::params::{ChangeFeed, ChannelParams, ParameterStore};

pub use children::{ChildRegistry, ChildTag};

/// One registered channel: the primary backend instance, its parameter
/// store, and its child slots.
#[derive(Debug)]
pub struct Channel {
    name: String,
    primary: InstanceId,
    store: ParameterStore,
    children: ChildRegistry,
    /// Clip time in seconds where the next `play` starts.
    start_time: f64,
}

impl Channel {
    pub fn new(name: &str, primary: InstanceId, params: ChannelParams, feed: ChangeFeed) -> Self {
        Self {
            name: name.to_string(),
            primary,
            store: ParameterStore::new(name, params, feed),
            children: ChildRegistry::new(),
            start_time: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primary(&self) -> InstanceId {
        self.primary
    }

    pub fn params(&self) -> &ChannelParams {
        self.store.params()
    }

    pub fn store(&mut self) -> &mut ParameterStore {
        &mut self.store
    }

    pub fn children(&self) -> &ChildRegistry {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut ChildRegistry {
        &mut self.children
    }

    /// Split borrow used when a child operation also needs the parent's
    /// current parameters.
    pub fn children_and_params(&mut self) -> (&mut ChildRegistry, &ChannelParams) {
        (&mut self.children, self.store.params())
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn set_start_time(&mut self, seconds: f64) {
        self.start_time = seconds;
    }
}

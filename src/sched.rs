//! Cooperative scheduler context driven by the host's per-tick pump.
//!
//! Holds the monotonic tick clock plus every pending fade and progress
//! watch. There are no OS threads; the registry steps this state from
//! [`tick`](crate::registry::ChannelRegistry::tick) and everything runs to
//! completion inside the calling tick.

use crate::interp::FadeTask;
use crate::progress::WatchTable;

#[derive(Debug, Default)]
pub struct Scheduler {
    /// Seconds accumulated across ticks.
    pub clock: f64,
    pub fades: Vec<FadeTask>,
    pub watches: WatchTable,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f64) -> f64 {
        self.clock += dt;
        self.clock
    }
}

//! Optional diagnostic wrappers around the public surface.

pub mod logging;

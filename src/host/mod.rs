//! Host-side plumbing around the session engine.
//!
//! This module contains the pieces a renderer needs to drive the engine:
//! - `clock`: time sources (monotonic and manual)
//! - `controls`: the start/stop and break/extend actions
//! - `driver`: the polling loop that emits display and completion events

pub mod clock;
pub mod controls;
pub mod driver;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use controls::{Action, ActionOutcome};
pub use driver::{DriverCommand, DriverEvent, SessionDriver};

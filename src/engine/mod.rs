//! Session engine for the Pomodoro clock.
//!
//! This module contains the countdown state machine:
//! - `session`: the engine itself (start / extend / stop / tick)
//! - `format`: clock text and progress scaling
//! - `error`: argument errors reported by engine operations

mod error;
mod format;
pub mod session;

pub use error::EngineError;
pub use format::{format_clock, scale_progress};
pub use session::SessionEngine;

//! Pomodoro Clock Library
//!
//! This library provides the core functionality for the Pomodoro clock.
//! It includes:
//! - Session engine: a pollable countdown state machine for work and break
//!   sessions that signals completion exactly once per interval
//! - Host plumbing: clock sources, the start/stop and break/extend controls,
//!   and the polling driver
//! - Host configuration with validation
//! - Completion alert (terminal bell)
//! - CLI command parsing, keyboard input and display utilities

pub mod cli;
pub mod config;
pub mod engine;
pub mod host;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use config::HostConfig;
pub use engine::{format_clock, EngineError, SessionEngine};
pub use host::{Action, ActionOutcome, DriverCommand, DriverEvent, SessionDriver};
pub use sound::{BellSoundPlayer, MockSoundPlayer, SoundError, SoundPlayer};
pub use types::{
    DisplayState, Session, SessionKind, SessionState, TickReport, BREAK_EXTENSION_MS,
    WORK_DURATION_MS,
};

//! Countdown state machine for work and break sessions.
//!
//! The engine holds no thread or timer. A host polls [`SessionEngine::tick`]
//! with an explicit timestamp, so expiry is observed on the first poll at or
//! after the end time:
//!
//! ```text
//! Idle --start--> Running --tick reaches 0--> Idle (completion, once)
//!                 Running --stop-->           Idle (no completion)
//!                 Running --extend-->         Running (break only)
//! ```

use tracing::{debug, info};

use super::error::EngineError;
use crate::types::{Session, SessionKind, SessionState, TickReport};

// ============================================================================
// SessionEngine
// ============================================================================

/// Single authority over the countdown session.
///
/// Operations read and write the session without internal locking; callers
/// must serialize access.
#[derive(Debug, Clone, Default)]
pub struct SessionEngine {
    session: Session,
}

impl SessionEngine {
    /// Creates an idle engine.
    pub fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    /// Starts a countdown of `duration_ms` at `now`.
    ///
    /// A running countdown is replaced without firing its completion.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDuration`] if `duration_ms` is zero.
    pub fn start(
        &mut self,
        kind: SessionKind,
        duration_ms: u64,
        now: u64,
    ) -> Result<(), EngineError> {
        if duration_ms == 0 {
            return Err(EngineError::InvalidDuration(duration_ms));
        }

        if self.session.is_running() {
            debug!(
                previous = self.session.kind().as_str(),
                "Replacing running session"
            );
        }

        self.session.begin(kind, duration_ms, now);
        debug!(
            kind = kind.as_str(),
            start = self.session.start_time(),
            end = self.session.end_time(),
            "Session started"
        );
        Ok(())
    }

    /// Pushes the end of a running break back by `amount_ms`.
    ///
    /// Returns `Ok(false)` and leaves state untouched when no break is running.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidExtension`] if `amount_ms` is zero.
    pub fn extend(&mut self, amount_ms: u64) -> Result<bool, EngineError> {
        if amount_ms == 0 {
            return Err(EngineError::InvalidExtension(amount_ms));
        }

        if !self.session.is_running_break() {
            debug!(
                state = self.session.state().as_str(),
                kind = self.session.kind().as_str(),
                "Ignoring extend outside a running break"
            );
            return Ok(false);
        }

        self.session.extend(amount_ms);
        debug!(amount_ms, end = self.session.end_time(), "Break extended");
        Ok(true)
    }

    /// Cancels any running session without a completion signal.
    ///
    /// Returns true if a session was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.session.is_running();
        self.session.reset();
        if was_running {
            debug!("Session stopped");
        }
        was_running
    }

    /// Polls the engine at `now`.
    ///
    /// The first poll at or after the end time moves the engine to idle and
    /// carries the completion signal; later polls report idle.
    pub fn tick(&mut self, now: u64) -> TickReport {
        if !self.session.is_running() {
            return TickReport::idle();
        }

        let remaining_ms = self.session.remaining_at(now);
        if remaining_ms == 0 {
            let kind = self.session.kind();
            self.session.reset();
            info!(kind = kind.as_str(), "Session completed");
            return TickReport::completed(kind);
        }

        TickReport {
            state: SessionState::Running,
            kind: self.session.kind(),
            remaining_ms,
            progress: self.session.progress_at(now),
            completed: None,
        }
    }

    /// Remaining fraction at `now` without advancing the state machine.
    pub fn progress(&self, now: u64) -> f64 {
        if self.session.is_running() {
            self.session.progress_at(now)
        } else {
            0.0
        }
    }

    /// Milliseconds left at `now` without advancing the state machine.
    pub fn remaining(&self, now: u64) -> u64 {
        if self.session.is_running() {
            self.session.remaining_at(now)
        } else {
            0
        }
    }

    /// Returns a reference to the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Returns true if a session is counting down.
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Returns true if a break is counting down.
    pub fn is_running_break(&self) -> bool {
        self.session.is_running_break()
    }
}

// ============================================================================
// Tests
// ============================================================================

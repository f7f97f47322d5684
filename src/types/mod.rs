//! Core data types for the Pomodoro clock.
//!
//! This module defines the data structures used for:
//! - Session kind and state
//! - The single countdown session owned by the engine
//! - Tick reports and the display projection handed to hosts

use serde::{Deserialize, Serialize};

/// Length of a work session in milliseconds (25 minutes).
pub const WORK_DURATION_MS: u64 = 1_500_000;

/// Length of a break, and the amount a running break is extended by (5 minutes).
pub const BREAK_EXTENSION_MS: u64 = 300_000;

// ============================================================================
// SessionKind
// ============================================================================

/// Which interval type a session counts down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Focused work period
    #[default]
    Work,
    /// Rest period
    Break,
}

impl SessionKind {
    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::Break => "break",
        }
    }

    /// Returns the default duration used when this kind is started from a host.
    pub fn default_duration_ms(&self) -> u64 {
        match self {
            SessionKind::Work => WORK_DURATION_MS,
            SessionKind::Break => BREAK_EXTENSION_MS,
        }
    }
}

// ============================================================================
// SessionState
// ============================================================================

/// Whether a countdown is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No countdown (initial state, and after stop or expiry)
    #[default]
    Idle,
    /// Counting down
    Running,
}

impl SessionState {
    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// The single countdown interval owned by the engine.
///
/// Timestamps are milliseconds on whatever monotonic scale the host's clock
/// uses. Fields are only written through [`Session::begin`],
/// [`Session::extend`] and [`Session::reset`], so `end_time >= start_time`
/// always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    state: SessionState,
    kind: SessionKind,
    start_time: u64,
    end_time: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an idle session whose default display is a full work interval.
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            kind: SessionKind::Work,
            start_time: 0,
            end_time: WORK_DURATION_MS,
        }
    }

    /// Idle or running.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Kind of the current (or most recent) interval.
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// When the current interval was started.
    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// When the current interval expires.
    pub fn end_time(&self) -> u64 {
        self.end_time
    }

    /// (Re)initialises the session as a running countdown.
    pub fn begin(&mut self, kind: SessionKind, duration_ms: u64, now: u64) {
        self.state = SessionState::Running;
        self.kind = kind;
        self.start_time = now;
        self.end_time = now.saturating_add(duration_ms);
    }

    /// Pushes the end time back by `amount_ms`.
    pub fn extend(&mut self, amount_ms: u64) {
        self.end_time = self.end_time.saturating_add(amount_ms);
    }

    /// Returns the session to its idle defaults.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Total length of the interval, including any extensions.
    pub fn total_ms(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// Milliseconds left at `now`, never negative.
    pub fn remaining_at(&self, now: u64) -> u64 {
        self.end_time.saturating_sub(now)
    }

    /// Remaining time over total time at `now`, clamped to `[0, 1]`.
    pub fn progress_at(&self, now: u64) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        (self.remaining_at(now) as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Returns true if the session is counting down.
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Returns true if a break is counting down.
    pub fn is_running_break(&self) -> bool {
        self.is_running() && self.kind == SessionKind::Break
    }
}

// ============================================================================
// TickReport
// ============================================================================

/// Result of polling the engine at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Engine state after this tick
    pub state: SessionState,
    /// Kind of the interval this report describes
    pub kind: SessionKind,
    /// Milliseconds left (0 when idle or expired)
    pub remaining_ms: u64,
    /// Remaining fraction in `[0, 1]` (0 when idle)
    pub progress: f64,
    /// Set exactly once, on the tick that observed expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<SessionKind>,
}

impl TickReport {
    /// Report for an engine with nothing counting down.
    pub fn idle() -> Self {
        Self {
            state: SessionState::Idle,
            kind: SessionKind::Work,
            remaining_ms: 0,
            progress: 0.0,
            completed: None,
        }
    }

    /// Report for the tick at which `kind` expired.
    pub fn completed(kind: SessionKind) -> Self {
        Self {
            state: SessionState::Idle,
            kind,
            remaining_ms: 0,
            progress: 0.0,
            completed: Some(kind),
        }
    }

    /// Returns true if this tick carried the completion signal.
    pub fn is_completed(&self) -> bool {
        self.completed.is_some()
    }

    /// Returns true if a countdown is still active after this tick.
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }
}

// ============================================================================
// DisplayState
// ============================================================================

/// What a host should show: clock text, scaled progress and color kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// `MM:SS` clock text
    pub clock: String,
    /// Remaining progress on the host's integer scale
    pub progress: u32,
    /// Kind used for coloring / labelling
    pub kind: SessionKind,
    /// Whether a countdown is active
    pub running: bool,
}

impl DisplayState {
    /// The reset projection: full work clock, full progress, work colors.
    pub fn reset(scale: u32) -> Self {
        Self {
            clock: crate::engine::format_clock(WORK_DURATION_MS),
            progress: scale,
            kind: SessionKind::Work,
            running: false,
        }
    }

    /// Projects a tick report onto the host's progress scale.
    ///
    /// An idle report without a completion maps to the reset projection.
    pub fn from_report(report: &TickReport, scale: u32) -> Self {
        if !report.is_running() && !report.is_completed() {
            return Self::reset(scale);
        }
        Self {
            clock: crate::engine::format_clock(report.remaining_ms),
            progress: crate::engine::scale_progress(report.progress, scale),
            kind: report.kind,
            running: report.is_running(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

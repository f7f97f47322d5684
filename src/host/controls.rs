//! The two user actions a host offers, mapped onto engine calls.
//!
//! - start/stop: idle starts a work session, running stops it
//! - break/extend: idle starts a break, a running break is extended by
//!   five minutes, a running work session ignores it

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{EngineError, SessionEngine};
use crate::types::{SessionKind, BREAK_EXTENSION_MS};

/// A user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Start a work session, or stop the running session
    StartStop,
    /// Start a break, or extend the running break
    BreakExtend,
}

/// What applying an [`Action`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// A session of this kind was started
    Started(SessionKind),
    /// The running session was stopped
    Stopped,
    /// The running break now ends at `end_time`
    Extended {
        /// New end time
        end_time: u64,
    },
    /// The action is not available in the current state
    Ignored,
}

/// Applies `action` to `engine` at `now`.
///
/// # Errors
///
/// Propagates engine argument errors.
pub fn apply(
    engine: &mut SessionEngine,
    action: Action,
    now: u64,
) -> Result<ActionOutcome, EngineError> {
    let outcome = match action {
        Action::StartStop => {
            if engine.is_running() {
                engine.stop();
                ActionOutcome::Stopped
            } else {
                let kind = SessionKind::Work;
                engine.start(kind, kind.default_duration_ms(), now)?;
                ActionOutcome::Started(kind)
            }
        }
        Action::BreakExtend => {
            if !engine.is_running() {
                let kind = SessionKind::Break;
                engine.start(kind, kind.default_duration_ms(), now)?;
                ActionOutcome::Started(kind)
            } else if engine.extend(BREAK_EXTENSION_MS)? {
                ActionOutcome::Extended {
                    end_time: engine.session().end_time(),
                }
            } else {
                ActionOutcome::Ignored
            }
        }
    };

    debug!(?action, ?outcome, "Action applied");
    Ok(outcome)
}

/// Label of the start/stop control while a session is (or is not) running.
pub fn start_stop_label(running: bool) -> &'static str {
    if running {
        "Stop"
    } else {
        "Start"
    }
}

/// Label of the break/extend control while a session is (or is not) running.
pub fn break_label(running: bool) -> &'static str {
    if running {
        "+5 min"
    } else {
        "Break"
    }
}

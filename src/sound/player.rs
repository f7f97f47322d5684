//! Terminal bell alert player.

use std::io::{self, Write};
use std::sync::Mutex;

use tracing::debug;

use super::error::SoundError;
use crate::types::SessionKind;

/// ASCII bell character.
const BELL: &[u8] = b"\x07";

/// Rings the terminal bell on completion.
///
/// Work completions ring twice so the two alerts are distinguishable by ear.
/// A disabled player reports it through [`BellSoundPlayer::is_disabled`];
/// the caller decides whether to ring.
pub struct BellSoundPlayer {
    out: Mutex<Box<dyn Write + Send>>,
    disabled: bool,
}

impl BellSoundPlayer {
    /// Creates a player writing to stdout.
    pub fn new(disabled: bool) -> Self {
        Self::with_writer(Box::new(io::stdout()), disabled)
    }

    /// Creates a player writing to an arbitrary sink.
    pub fn with_writer(out: Box<dyn Write + Send>, disabled: bool) -> Self {
        Self {
            out: Mutex::new(out),
            disabled,
        }
    }

    /// Rings the bell for the session that just ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written or flushed.
    pub fn play(&self, kind: SessionKind) -> Result<(), SoundError> {
        let rings = match kind {
            SessionKind::Work => 2,
            SessionKind::Break => 1,
        };

        let mut out = self
            .out
            .lock()
            .map_err(|e| SoundError::PlaybackError(e.to_string()))?;
        for _ in 0..rings {
            out.write_all(BELL)?;
        }
        out.flush()?;

        debug!(kind = kind.as_str(), rings, "Bell rung");
        Ok(())
    }

    /// Returns true if the user turned the alert off.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

//! Completion alert for the Pomodoro clock.
//!
//! The alert is optional host behaviour: a failure to play it is reported to
//! the caller, which logs it and leaves the session engine untouched.

mod error;
mod player;

pub use error::SoundError;
pub use player::BellSoundPlayer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::types::SessionKind;

/// Trait for alert playback implementations.
///
/// This trait abstracts the alert, allowing for different implementations
/// (e.g., terminal bell, mock for testing).
pub trait SoundPlayer: Send + Sync {
    /// Plays the alert for the session kind that just completed.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, kind: SessionKind) -> Result<(), SoundError>;

    /// Returns true if the alert is turned off and should not be played.
    fn is_disabled(&self) -> bool;
}

impl SoundPlayer for BellSoundPlayer {
    fn play(&self, kind: SessionKind) -> Result<(), SoundError> {
        BellSoundPlayer::play(self, kind)
    }

    fn is_disabled(&self) -> bool {
        BellSoundPlayer::is_disabled(self)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SessionKind>>,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    /// Creates an enabled mock that records every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns the mock's disabled flag on or off.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Makes subsequent `play` calls fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of successful `play` calls.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Kinds passed to successful `play` calls, in order.
    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SessionKind> {
        self.play_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, kind: SessionKind) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls
            .lock()
            .map_err(|e| SoundError::PlaybackError(e.to_string()))?
            .push(kind);
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}

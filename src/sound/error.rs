//! Sound alert error types.
//!
//! Alert failures never affect the session engine; the driver logs them
//! and carries on.

use thiserror::Error;

/// Errors that can occur while ringing the completion alert.
#[derive(Debug, Error)]
pub enum SoundError {
    /// The alert output could not be written.
    #[error("アラートを出力できません: {0}")]
    OutputError(String),

    /// Generic alert playback error.
    #[error("サウンド再生エラー: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::OutputError(_) => "端末の出力先を確認してください",
            Self::PlaybackError(_) => "--no-sound で無効化できます",
        }
    }
}

impl From<std::io::Error> for SoundError {
    fn from(err: std::io::Error) -> Self {
        Self::OutputError(err.to_string())
    }
}

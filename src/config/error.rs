//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating [`HostConfig`](super::HostConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("設定ファイルを読み込めません: {path}: {source}")]
    Read {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for this schema.
    #[error("設定ファイルの形式が不正です: {path}: {source}")]
    Parse {
        /// Path of the file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A value is outside its allowed range.
    #[error("設定値が不正です: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Read { .. } => "ファイルのアクセス権を確認してください",
            Self::Parse { .. } => "JSONの構文を確認するか、ファイルを削除して既定値に戻してください",
            Self::Invalid(_) => "`pomodoro-clock config` で既定値を確認してください",
        }
    }
}

//! Session engine error types.

use thiserror::Error;

/// Errors returned synchronously by [`SessionEngine`](super::SessionEngine) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `start` was called with a zero-length duration.
    #[error("セッションの長さは1ミリ秒以上で指定してください（指定値: {0}ms）")]
    InvalidDuration(u64),

    /// `extend` was called with a zero-length amount.
    #[error("延長時間は1ミリ秒以上で指定してください（指定値: {0}ms）")]
    InvalidExtension(u64),
}

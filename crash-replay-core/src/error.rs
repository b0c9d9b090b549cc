//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CrashReplayError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// The checkpoint history is too shallow for the requested lookback.
    #[error("Tried to read past the boundary of checkpoint history: steps ago {steps_ago}, checkpoints {len}")]
    OutOfRange {
        /// Requested number of checkpoints behind the newest one.
        steps_ago: usize,
        /// Number of checkpoints held.
        len: usize,
    },

    /// Sampling was attempted on a replay buffer with no entries.
    #[error("Cannot sample from an empty replay buffer")]
    EmptyBuffer,

    /// Configuration values that cannot be used together.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

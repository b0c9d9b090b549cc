//! Configuration of [`CheckpointHistory`](super::CheckpointHistory).
use crate::error::CrashReplayError;
use serde::{Deserialize, Serialize};
use std::default::Default;

// Absorbs rounding of ratios such as 3.0 / 0.3 before floor/ceil.
const EPS: f64 = 1e-9;

/// Configuration of [`CheckpointHistory`](super::CheckpointHistory).
///
/// # Examples
///
/// ```rust
/// use crash_replay_core::CheckpointHistoryConfig;
///
/// let config = CheckpointHistoryConfig::default()
///     .cp_step_size_sec(0.5)
///     .window_sec(3.0);
///
/// assert_eq!(config.capacity(), 6);
/// assert_eq!(config.interval_ticks(10), 5);
/// assert_eq!(config.steps_for(1.5), 3);
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CheckpointHistoryConfig {
    /// Seconds of simulated time between two checkpoints.
    pub cp_step_size_sec: f64,

    /// Seconds of simulated time covered by the history.
    pub window_sec: f64,
}

impl Default for CheckpointHistoryConfig {
    fn default() -> Self {
        Self {
            cp_step_size_sec: 0.5,
            window_sec: 3.0,
        }
    }
}

impl CheckpointHistoryConfig {
    /// Sets the interval between checkpoints in seconds.
    pub fn cp_step_size_sec(mut self, cp_step_size_sec: f64) -> Self {
        self.cp_step_size_sec = cp_step_size_sec;
        self
    }

    /// Sets the time window covered by the history in seconds.
    pub fn window_sec(mut self, window_sec: f64) -> Self {
        self.window_sec = window_sec;
        self
    }

    /// Maximum number of checkpoints held, `ceil(window_sec / cp_step_size_sec)`.
    pub fn capacity(&self) -> usize {
        (self.window_sec / self.cp_step_size_sec - EPS).ceil() as usize
    }

    /// Ticks between two checkpoints for the given control frequency.
    pub fn interval_ticks(&self, control_freq: u64) -> u64 {
        (self.cp_step_size_sec * control_freq as f64).round() as u64
    }

    /// Number of whole checkpoint intervals in `seconds`.
    pub fn steps_for(&self, seconds: f64) -> usize {
        (seconds / self.cp_step_size_sec + EPS).floor() as usize
    }

    /// Checks that the configuration yields a usable history.
    pub fn validate(&self, control_freq: u64) -> Result<(), CrashReplayError> {
        if !(self.cp_step_size_sec.is_finite() && self.cp_step_size_sec > 0.0) {
            return Err(CrashReplayError::InvalidConfig(format!(
                "cp_step_size_sec must be positive, got {}",
                self.cp_step_size_sec
            )));
        }
        if !(self.window_sec.is_finite() && self.window_sec >= self.cp_step_size_sec) {
            return Err(CrashReplayError::InvalidConfig(format!(
                "window_sec ({}) must cover at least one checkpoint interval ({})",
                self.window_sec, self.cp_step_size_sec
            )));
        }
        if self.interval_ticks(control_freq) == 0 {
            return Err(CrashReplayError::InvalidConfig(format!(
                "cp_step_size_sec {} is shorter than one tick at {} ticks per second",
                self.cp_step_size_sec, control_freq
            )));
        }
        Ok(())
    }
}

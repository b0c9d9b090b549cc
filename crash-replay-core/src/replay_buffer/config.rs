//! Configuration of [`CollisionReplayBuffer`](super::CollisionReplayBuffer).
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Configuration of [`CollisionReplayBuffer`](super::CollisionReplayBuffer).
///
/// # Examples
///
/// ```rust
/// use crash_replay_core::CollisionReplayBufferConfig;
///
/// let config = CollisionReplayBufferConfig::default()
///     .capacity(50)
///     .seed(7);
/// assert_eq!(config.capacity, 50);
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CollisionReplayBufferConfig {
    /// Maximum number of checkpoints stored. When the buffer is full, a new
    /// checkpoint overwrites a stored one in round-robin order.
    pub capacity: usize,

    /// Random seed used for sampling.
    pub seed: u64,
}

impl Default for CollisionReplayBufferConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            seed: 42,
        }
    }
}

impl CollisionReplayBufferConfig {
    /// Sets the capacity of the replay buffer.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the random seed for sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

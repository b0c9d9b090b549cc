//! Replay buffer of checkpoints preceding collisions.
mod base;
mod config;
pub use base::CollisionReplayBuffer;
pub use config::CollisionReplayBufferConfig;

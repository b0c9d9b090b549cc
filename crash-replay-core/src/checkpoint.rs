//! Checkpoints of the simulation and the rolling history kept during an episode.
//!
//! A [`Checkpoint`] is an owned copy of the environment and of the observation
//! it emitted at some tick. The [`CheckpointHistory`] takes one every
//! `cp_step_size_sec` of simulated time and keeps the last few seconds of them,
//! so that the state leading up to a collision can be looked up once the
//! collision has happened.
mod base;
mod config;
mod history;
pub use base::Checkpoint;
pub use config::CheckpointHistoryConfig;
pub use history::CheckpointHistory;

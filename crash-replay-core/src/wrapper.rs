//! Collision-triggered experience replay around a simulation environment.
mod base;
mod config;
mod state;
pub use base::ExperienceReplayWrapper;
pub use config::ExperienceReplayConfig;
pub use state::{EpisodeState, ResetKind};

#![warn(missing_docs)]
//! Collision-triggered experience replay for multi-agent drone simulation.
//!
//! While an episode runs, [`ExperienceReplayWrapper`] keeps a short
//! [`CheckpointHistory`] of copies of the environment. When the environment
//! reports a collision, the checkpoint taken a fixed lead time before it is
//! committed to a [`CollisionReplayBuffer`], which outlives the episode. At
//! reset, the wrapper may start the next episode from one of those
//! checkpoints instead of a fresh state, so that training spends more time
//! close to collisions.
//!
//! ```rust
//! use crash_replay_core::{
//!     dummy::{ScriptedAct, ScriptedEnv, ScriptedEnvConfig},
//!     ExperienceReplayConfig, ExperienceReplayWrapper, ReplayBufferBase, SimEnv,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let env_config = ScriptedEnvConfig::default().collision_ticks(vec![40]);
//! let env = ScriptedEnv::build(&env_config, 0)?;
//! let config = ExperienceReplayConfig::default().replay_buffer_sample_prob(1.0);
//! let mut wrapper = ExperienceReplayWrapper::build(env, &config)?;
//!
//! wrapper.reset()?;
//! let act = ScriptedAct::idle(2);
//! for _ in 0..40 {
//!     wrapper.step(&act);
//! }
//! assert_eq!(wrapper.replay_buffer().len(), 1);
//!
//! // Starts from the checkpoint 1.5 s before the collision
//! let obs = wrapper.reset()?;
//! assert_eq!(obs.tick, 25);
//! # Ok(())
//! # }
//! ```
pub mod dummy;
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Info, Obs, Policy, ReplayBufferBase, SimEnv, Step};

mod checkpoint;
pub use checkpoint::{Checkpoint, CheckpointHistory, CheckpointHistoryConfig};

mod replay_buffer;
pub use replay_buffer::{CollisionReplayBuffer, CollisionReplayBufferConfig};

mod wrapper;
pub use wrapper::{EpisodeState, ExperienceReplayConfig, ExperienceReplayWrapper, ResetKind};

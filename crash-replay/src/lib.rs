//! Collision-triggered experience replay for multi-drone reinforcement learning.
//!
//! This workspace consists of the following crates:
//!
//! * `crash-replay-core` provides the traits describing a simulation
//!   environment ([`SimEnv`]), the rolling [`CheckpointHistory`], the
//!   [`CollisionReplayBuffer`] and the [`ExperienceReplayWrapper`] tying them
//!   to the step and reset calls of an environment.
//! * `crash-replay` (this crate) re-exports the core and adds
//!   [`PointSwarmEnv`], a small kinematic swarm to exercise the replay
//!   machinery, together with the `swarm_replay` example.
//!
//! ```rust
//! use crash_replay::{
//!     ExperienceReplayConfig, ExperienceReplayWrapper, PointSwarmConfig, PointSwarmEnv, SimEnv,
//!     SwarmAct,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let env = PointSwarmEnv::build(&PointSwarmConfig::default(), 0)?;
//! let config = ExperienceReplayConfig::default().replay_buffer_sample_prob(0.5);
//! let mut wrapper = ExperienceReplayWrapper::build(env, &config)?;
//!
//! wrapper.reset()?;
//! let act = SwarmAct::zeros(wrapper.env().n_drones());
//! let (step, record) = wrapper.step(&act);
//! assert_eq!(step.reward.len(), 8);
//! assert!(record.get_scalar("replay_buffer_size").is_ok());
//! # Ok(())
//! # }
//! ```
pub mod swarm;
pub use swarm::{PointSwarmConfig, PointSwarmEnv, SwarmAct, SwarmInfo, SwarmObs, SwarmScene};

pub use crash_replay_core::{
    error, record, Checkpoint, CheckpointHistory, CheckpointHistoryConfig, CollisionReplayBuffer,
    CollisionReplayBufferConfig, EpisodeState, ExperienceReplayConfig, ExperienceReplayWrapper,
    Policy, ReplayBufferBase, ResetKind, SimEnv, Step,
};

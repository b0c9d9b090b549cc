//! A kinematic point swarm implementing [`SimEnv`](crash_replay_core::SimEnv).
//!
//! Drones are discs moving in a square arena. Each step adds the commanded
//! acceleration to the velocity, clips the speed and reflects drones off the
//! walls. Two drones are in contact when their centers are closer than
//! `collision_radius`; a contact that was not there on the previous tick is a
//! unique collision. There is no further dynamics: the environment exists to
//! drive the experience replay machinery with realistic collision patterns.
mod base;
mod config;
pub use base::{PointSwarmEnv, SwarmAct, SwarmInfo, SwarmObs, SwarmScene};
pub use config::PointSwarmConfig;

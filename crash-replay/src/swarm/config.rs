//! Configuration of [`PointSwarmEnv`](super::PointSwarmEnv).
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Configuration of [`PointSwarmEnv`](super::PointSwarmEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PointSwarmConfig {
    /// Number of drones.
    pub n_drones: usize,

    /// Ticks per simulated second.
    pub control_freq: u64,

    /// Side length of the square arena.
    pub arena_size: f32,

    /// Center distance below which two drones are in contact.
    pub collision_radius: f32,

    /// Speed limit.
    pub max_speed: f32,

    /// Acceleration limit of the commands.
    pub max_accel: f32,

    /// Episode length in seconds; the episode is truncated afterwards.
    pub episode_len_sec: f64,

    /// Seconds at the start of an episode during which collisions are ignored
    /// by the replay machinery.
    pub collisions_grace_period_sec: f64,

    /// Whether experience replay is enabled.
    pub use_replay_buffer: bool,

    /// Whether experience replay is active from the start.
    pub activate_replay_buffer: bool,
}

impl Default for PointSwarmConfig {
    fn default() -> Self {
        Self {
            n_drones: 8,
            control_freq: 100,
            arena_size: 4.0,
            collision_radius: 0.5,
            max_speed: 2.0,
            max_accel: 4.0,
            episode_len_sec: 10.0,
            collisions_grace_period_sec: 1.0,
            use_replay_buffer: true,
            activate_replay_buffer: true,
        }
    }
}

impl PointSwarmConfig {
    /// Sets the number of drones.
    pub fn n_drones(mut self, v: usize) -> Self {
        self.n_drones = v;
        self
    }

    /// Sets the control frequency.
    pub fn control_freq(mut self, v: u64) -> Self {
        self.control_freq = v;
        self
    }

    /// Sets the arena size.
    pub fn arena_size(mut self, v: f32) -> Self {
        self.arena_size = v;
        self
    }

    /// Sets the episode length in seconds.
    pub fn episode_len_sec(mut self, v: f64) -> Self {
        self.episode_len_sec = v;
        self
    }

    /// Sets the collision grace period in seconds.
    pub fn collisions_grace_period_sec(mut self, v: f64) -> Self {
        self.collisions_grace_period_sec = v;
        self
    }

    /// Sets whether experience replay is active from the start.
    pub fn activate_replay_buffer(mut self, v: bool) -> Self {
        self.activate_replay_buffer = v;
        self
    }

    /// Episode length in ticks.
    pub fn episode_len_ticks(&self) -> u64 {
        (self.episode_len_sec * self.control_freq as f64).round() as u64
    }
}

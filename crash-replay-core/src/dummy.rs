//! A scripted environment used in tests.
//!
//! [`ScriptedEnv`] moves its agents along a line at unit speed and reports a
//! collision at every tick listed in its configuration. Its observation
//! carries the tick and the episode counter, which makes it easy to tell
//! which checkpoint a replayed episode was started from.
use crate::{record::Record, Act, Info, Obs, SimEnv, Step};
use anyhow::Result;

/// Observation of [`ScriptedEnv`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedObs {
    /// Tick at which the observation was emitted.
    pub tick: u64,
    /// Number of fresh resets before the observation was emitted.
    pub episode: u64,
    /// Agent positions.
    pub positions: Vec<f32>,
}

impl Obs for ScriptedObs {
    fn len(&self) -> usize {
        self.positions.len()
    }
}

/// Action of [`ScriptedEnv`], a velocity per agent.
#[derive(Clone, Debug)]
pub struct ScriptedAct(pub Vec<f32>);

impl ScriptedAct {
    /// Zero velocity for `n_agents` agents.
    pub fn idle(n_agents: usize) -> Self {
        Self(vec![0.0; n_agents])
    }
}

impl Act for ScriptedAct {
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Info of [`ScriptedEnv`].
#[derive(Clone, Debug)]
pub struct ScriptedInfo;

impl Info for ScriptedInfo {}

/// Rendering handle of [`ScriptedEnv`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneHandle(pub u64);

/// Configuration of [`ScriptedEnv`].
#[derive(Clone, Debug)]
pub struct ScriptedEnvConfig {
    /// Ticks per second.
    pub control_freq: u64,
    /// Number of agents.
    pub n_agents: usize,
    /// Ticks at which a collision is reported, in every episode.
    pub collision_ticks: Vec<u64>,
    /// Collision grace period in seconds.
    pub grace_period_sec: f64,
    /// Initial value of [`SimEnv::use_replay_buffer`].
    pub use_replay_buffer: bool,
    /// Initial value of [`SimEnv::activate_replay_buffer`].
    pub activate_replay_buffer: bool,
}

impl Default for ScriptedEnvConfig {
    fn default() -> Self {
        Self {
            control_freq: 10,
            n_agents: 2,
            collision_ticks: vec![],
            grace_period_sec: 0.0,
            use_replay_buffer: true,
            activate_replay_buffer: true,
        }
    }
}

impl ScriptedEnvConfig {
    /// Sets the ticks at which collisions are reported.
    pub fn collision_ticks(mut self, ticks: Vec<u64>) -> Self {
        self.collision_ticks = ticks;
        self
    }

    /// Sets the collision grace period.
    pub fn grace_period_sec(mut self, sec: f64) -> Self {
        self.grace_period_sec = sec;
        self
    }

    /// Sets whether experience replay is active.
    pub fn activate_replay_buffer(mut self, v: bool) -> Self {
        self.activate_replay_buffer = v;
        self
    }
}

/// Scripted environment.
#[derive(Debug)]
pub struct ScriptedEnv {
    config: ScriptedEnvConfig,
    tick: u64,
    episode: u64,
    positions: Vec<f32>,
    collisions: Vec<bool>,
    scene: Option<SceneHandle>,
}

impl ScriptedEnv {
    /// Current observation.
    pub fn observe(&self) -> ScriptedObs {
        ScriptedObs {
            tick: self.tick,
            episode: self.episode,
            positions: self.positions.clone(),
        }
    }

    /// Number of agents.
    pub fn n_agents(&self) -> usize {
        self.config.n_agents
    }

    /// Attached rendering handle.
    pub fn scene(&self) -> Option<&SceneHandle> {
        self.scene.as_ref()
    }

    /// Number of fresh resets so far.
    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// Switches experience replay on or off.
    pub fn set_activate_replay_buffer(&mut self, v: bool) {
        self.config.activate_replay_buffer = v;
    }
}

impl Clone for ScriptedEnv {
    /// Copies the simulation state but not the rendering handle.
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            tick: self.tick,
            episode: self.episode,
            positions: self.positions.clone(),
            collisions: self.collisions.clone(),
            scene: None,
        }
    }
}

impl SimEnv for ScriptedEnv {
    type Config = ScriptedEnvConfig;
    type Obs = ScriptedObs;
    type Act = ScriptedAct;
    type Info = ScriptedInfo;
    type Scene = SceneHandle;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            tick: 0,
            episode: 0,
            positions: (0..config.n_agents).map(|i| i as f32).collect(),
            collisions: vec![false; config.n_agents],
            scene: Some(SceneHandle(seed as u64)),
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        self.tick += 1;
        for (p, v) in self.positions.iter_mut().zip(a.0.iter()) {
            *p += 1.0 + v;
        }
        let collided = self.config.collision_ticks.contains(&self.tick);
        self.collisions = (0..self.config.n_agents).map(|i| collided && i == 0).collect();

        let reward = self
            .collisions
            .iter()
            .map(|&c| if c { -1.0 } else { 0.0 })
            .collect();
        let n = self.config.n_agents;
        let step = Step::new(
            self.observe(),
            a.clone(),
            reward,
            vec![0; n],
            vec![0; n],
            ScriptedInfo,
        );
        (step, Record::from_scalar("tick", self.tick as f32))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.tick = 0;
        self.episode += 1;
        self.positions = (0..self.config.n_agents).map(|i| i as f32).collect();
        self.collisions = vec![false; self.config.n_agents];
        Ok(self.observe())
    }

    fn tick(&self) -> u64 {
        self.tick
    }

    fn control_freq(&self) -> u64 {
        self.config.control_freq
    }

    fn last_step_unique_collisions(&self) -> &[bool] {
        &self.collisions
    }

    fn collisions_grace_period_sec(&self) -> f64 {
        self.config.grace_period_sec
    }

    fn use_replay_buffer(&self) -> bool {
        self.config.use_replay_buffer
    }

    fn activate_replay_buffer(&self) -> bool {
        self.config.activate_replay_buffer
    }

    fn take_scene(&mut self) -> Option<Self::Scene> {
        self.scene.take()
    }

    fn set_scene(&mut self, scene: Option<Self::Scene>) {
        self.scene = scene;
    }
}

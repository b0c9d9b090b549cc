//! Point swarm environment.
use super::PointSwarmConfig;
use anyhow::{ensure, Result};
use crash_replay_core::{
    record::{Record, RecordValue},
    Act, Info, Obs, SimEnv, Step,
};
use log::{debug, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::PI;

const MAX_SPAWN_TRIALS: usize = 100;

/// Position and velocity `[x, y, vx, vy]` of each drone.
#[derive(Clone, Debug, PartialEq)]
pub struct SwarmObs(pub Vec<[f32; 4]>);

impl Obs for SwarmObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Commanded acceleration `[ax, ay]` of each drone.
#[derive(Clone, Debug)]
pub struct SwarmAct(pub Vec<[f32; 2]>);

impl SwarmAct {
    /// No acceleration for any of `n_drones` drones.
    pub fn zeros(n_drones: usize) -> Self {
        Self(vec![[0.0; 2]; n_drones])
    }
}

impl Act for SwarmAct {
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Information of a step.
#[derive(Clone, Debug)]
pub struct SwarmInfo {
    /// Number of drone pairs in contact after the step.
    pub n_contacts: usize,
}

impl Info for SwarmInfo {}

/// Rendering resources of the swarm.
///
/// Nothing is drawn; the scene counts the frames it was asked for.
#[derive(Debug)]
pub struct SwarmScene {
    title: String,
    frames: usize,
}

impl SwarmScene {
    /// Creates a scene.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            frames: 0,
        }
    }

    /// Title of the scene.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of frames drawn.
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn draw(&mut self, _pos: &[[f32; 2]]) {
        self.frames += 1;
    }
}

/// Point swarm environment.
pub struct PointSwarmEnv {
    config: PointSwarmConfig,
    rng: StdRng,
    tick: u64,
    pos: Vec<[f32; 2]>,
    vel: Vec<[f32; 2]>,
    contacts: Vec<bool>,
    unique_collisions: Vec<bool>,
    activate_replay_buffer: bool,
    scene: Option<SwarmScene>,
}

impl PointSwarmEnv {
    /// Current observation.
    pub fn observe(&self) -> SwarmObs {
        SwarmObs(
            self.pos
                .iter()
                .zip(self.vel.iter())
                .map(|(p, v)| [p[0], p[1], v[0], v[1]])
                .collect(),
        )
    }

    /// Number of drones.
    pub fn n_drones(&self) -> usize {
        self.config.n_drones
    }

    /// Positions of the drones.
    pub fn positions(&self) -> &[[f32; 2]] {
        &self.pos
    }

    /// Attached scene, if any.
    pub fn scene(&self) -> Option<&SwarmScene> {
        self.scene.as_ref()
    }

    /// Switches experience replay on or off, e.g. after a warm-up.
    pub fn set_activate_replay_buffer(&mut self, v: bool) {
        self.activate_replay_buffer = v;
    }

    /// Number of drone pairs.
    fn n_pairs(&self) -> usize {
        self.config.n_drones * (self.config.n_drones - 1) / 2
    }

    /// Contact flags of all pairs `(i, j)`, `i < j`, in lexicographic order.
    fn detect_contacts(&self) -> Vec<bool> {
        let r2 = self.config.collision_radius * self.config.collision_radius;
        let n = self.config.n_drones;
        let mut contacts = Vec::with_capacity(self.n_pairs());
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = self.pos[i][0] - self.pos[j][0];
                let dy = self.pos[i][1] - self.pos[j][1];
                contacts.push(dx * dx + dy * dy < r2);
            }
        }
        contacts
    }

    fn random_position(&mut self) -> [f32; 2] {
        let margin = self.config.collision_radius / 2.0;
        let high = self.config.arena_size - margin;
        [
            self.rng.gen_range(margin..high),
            self.rng.gen_range(margin..high),
        ]
    }

    /// Draws a position away from the drones placed so far, giving up after
    /// a fixed number of trials.
    fn sample_position(&mut self) -> [f32; 2] {
        let r2 = self.config.collision_radius * self.config.collision_radius;
        for _ in 0..MAX_SPAWN_TRIALS {
            let p = self.random_position();
            let free = self.pos.iter().all(|q| {
                let (dx, dy) = (p[0] - q[0], p[1] - q[1]);
                dx * dx + dy * dy >= r2
            });
            if free {
                return p;
            }
        }
        warn!(
            "Drone {} spawned in contact after {} trials",
            self.pos.len(),
            MAX_SPAWN_TRIALS
        );
        self.random_position()
    }

    /// Places the drones at random and starts the episode clock.
    fn spawn(&mut self) {
        self.pos.clear();
        self.vel.clear();
        for _ in 0..self.config.n_drones {
            let p = self.sample_position();
            let angle = self.rng.gen_range(0.0..2.0 * PI);
            let speed = self.rng.gen_range(0.5f32..=1.0) * self.config.max_speed;
            self.pos.push(p);
            self.vel.push([speed * angle.cos(), speed * angle.sin()]);
        }

        self.tick = 0;
        self.contacts = self.detect_contacts();
        self.unique_collisions = vec![false; self.n_pairs()];
    }

    fn integrate(&mut self, a: &SwarmAct) {
        let dt = 1.0 / self.config.control_freq as f32;
        let size = self.config.arena_size;
        let max_accel = self.config.max_accel;
        let max_speed = self.config.max_speed;

        for i in 0..self.config.n_drones {
            let acc = a.0.get(i).copied().unwrap_or([0.0; 2]);
            let v = &mut self.vel[i];
            v[0] += acc[0].clamp(-max_accel, max_accel) * dt;
            v[1] += acc[1].clamp(-max_accel, max_accel) * dt;
            let speed = (v[0] * v[0] + v[1] * v[1]).sqrt();
            if speed > max_speed {
                v[0] *= max_speed / speed;
                v[1] *= max_speed / speed;
            }

            let p = &mut self.pos[i];
            for k in 0..2 {
                p[k] += v[k] * dt;
                if p[k] < 0.0 {
                    p[k] = -p[k];
                    v[k] = -v[k];
                } else if p[k] > size {
                    p[k] = 2.0 * size - p[k];
                    v[k] = -v[k];
                }
            }
        }
    }
}

impl Clone for PointSwarmEnv {
    /// Copies the simulation, including the random number generator, but not
    /// the scene.
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            rng: self.rng.clone(),
            tick: self.tick,
            pos: self.pos.clone(),
            vel: self.vel.clone(),
            contacts: self.contacts.clone(),
            unique_collisions: self.unique_collisions.clone(),
            activate_replay_buffer: self.activate_replay_buffer,
            scene: None,
        }
    }
}

impl SimEnv for PointSwarmEnv {
    type Config = PointSwarmConfig;
    type Obs = SwarmObs;
    type Act = SwarmAct;
    type Info = SwarmInfo;
    type Scene = SwarmScene;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        ensure!(config.n_drones >= 2, "A swarm needs at least two drones");
        ensure!(config.control_freq > 0, "control_freq must be positive");
        ensure!(
            config.arena_size > 2.0 * config.collision_radius,
            "The arena is too small for the collision radius"
        );

        let mut env = Self {
            config: config.clone(),
            rng: StdRng::seed_from_u64(seed as u64),
            tick: 0,
            pos: vec![],
            vel: vec![],
            contacts: vec![],
            unique_collisions: vec![],
            activate_replay_buffer: config.activate_replay_buffer,
            scene: Some(SwarmScene::new(format!("point swarm {}", seed))),
        };
        env.spawn();
        Ok(env)
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        if a.len() != self.config.n_drones {
            warn!(
                "Action for {} drones given to a swarm of {}; unmatched entries are ignored",
                a.len(),
                self.config.n_drones
            );
        }
        self.integrate(a);
        self.tick += 1;

        let contacts = self.detect_contacts();
        self.unique_collisions = contacts
            .iter()
            .zip(self.contacts.iter())
            .map(|(&now, &before)| now && !before)
            .collect();
        self.contacts = contacts;

        let n = self.config.n_drones;
        let mut reward = vec![0f32; n];
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if self.unique_collisions[k] {
                    reward[i] -= 1.0;
                    reward[j] -= 1.0;
                }
                k += 1;
            }
        }

        if let Some(scene) = self.scene.as_mut() {
            scene.draw(&self.pos);
        }

        let n_collisions = self.unique_collisions.iter().filter(|&&c| c).count();
        let n_contacts = self.contacts.iter().filter(|&&c| c).count();
        let is_truncated = (self.tick >= self.config.episode_len_ticks()) as i8;
        let step = Step::new(
            self.observe(),
            a.clone(),
            reward,
            vec![0; n],
            vec![is_truncated; n],
            SwarmInfo { n_contacts },
        );
        let record = Record::from_slice(&[
            ("tick", RecordValue::Scalar(self.tick as f32)),
            ("n_collisions", RecordValue::Scalar(n_collisions as f32)),
        ]);

        (step, record)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.spawn();
        debug!("Reset point swarm of {} drones", self.config.n_drones);
        Ok(self.observe())
    }

    fn tick(&self) -> u64 {
        self.tick
    }

    fn control_freq(&self) -> u64 {
        self.config.control_freq
    }

    fn last_step_unique_collisions(&self) -> &[bool] {
        &self.unique_collisions
    }

    fn collisions_grace_period_sec(&self) -> f64 {
        self.config.collisions_grace_period_sec
    }

    fn use_replay_buffer(&self) -> bool {
        self.config.use_replay_buffer
    }

    fn activate_replay_buffer(&self) -> bool {
        self.activate_replay_buffer
    }

    fn take_scene(&mut self) -> Option<Self::Scene> {
        self.scene.take()
    }

    fn set_scene(&mut self, scene: Option<Self::Scene>) {
        self.scene = scene;
    }
}

//! Experience replay wrapper.
use super::{EpisodeState, ExperienceReplayConfig, ResetKind};
use crate::{
    record::{Record, RecordValue},
    Checkpoint, CheckpointHistory, CollisionReplayBuffer, ReplayBufferBase, SimEnv, Step,
};
use anyhow::Result;
use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Wraps an environment, records collision events and replays them at reset.
///
/// The wrapper owns two containers with different lifetimes. The
/// [`CheckpointHistory`] belongs to the running episode and is emptied at
/// every reset. The replay buffer belongs to the wrapper and keeps its
/// content across episodes.
///
/// # Step
///
/// After the wrapped environment has stepped, the wrapper commits a
/// checkpoint to the replay buffer if all of the following hold:
///
/// 1. the environment reports a unique collision for this step,
/// 2. [`SimEnv::use_replay_buffer`] and [`SimEnv::activate_replay_buffer`] are set,
/// 3. the tick is past the collision grace period,
/// 4. the [`EpisodeState`] accepts commits,
/// 5. the last commit of the episode, if any, is more than the cooldown ago.
///
/// The committed checkpoint is the one taken `save_time_before_collision_sec`
/// before the collision. Since the commit is decided before the checkpoint of
/// the current tick is taken, that checkpoint is never the one at the
/// collision tick. If the history does not reach back far enough, the
/// collision is skipped with a warning.
///
/// Then, on every checkpoint tick of an episode that accepts commits, a copy
/// of the environment and the observation is added to the history.
///
/// # Reset
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Armed: fresh reset
///     Armed --> Committed: collision committed
///     Committed --> Armed: fresh reset
///     Armed --> Replayed: replayed reset
///     Committed --> Replayed: replayed reset
///     Replayed --> Armed: fresh reset
///     Replayed --> Replayed: replayed reset
/// ```
///
/// With probability `replay_buffer_sample_prob`, and if the buffer is not
/// empty and replay is enabled and active, the reset draws a checkpoint from
/// the buffer. The environment of the checkpoint becomes the live environment,
/// the rendering handle is moved over from the previous live environment, and
/// the stored observation is returned. Otherwise the environment is reset as
/// usual.
pub struct ExperienceReplayWrapper<E, R = CollisionReplayBuffer<Checkpoint<E>>>
where
    E: SimEnv,
    R: ReplayBufferBase<Item = Checkpoint<E>>,
{
    env: E,
    replay_buffer: R,
    history: CheckpointHistory<E>,
    episode: EpisodeState,
    last_commit_tick: Option<u64>,
    last_reset: Option<ResetKind>,
    replay_buffer_sample_prob: f64,
    lookback_steps: usize,
    cooldown_ticks: u64,
    commit_once: bool,
    rng: StdRng,
}

impl<E: SimEnv> ExperienceReplayWrapper<E> {
    /// Wraps `env` with a [`CollisionReplayBuffer`] built from `config`.
    pub fn build(env: E, config: &ExperienceReplayConfig) -> Result<Self> {
        config.validate(env.control_freq())?;
        let replay_buffer = CollisionReplayBuffer::build(&config.replay_buffer);
        Self::with_replay_buffer(env, config, replay_buffer)
    }
}

impl<E, R> ExperienceReplayWrapper<E, R>
where
    E: SimEnv,
    R: ReplayBufferBase<Item = Checkpoint<E>>,
{
    /// Wraps `env` with a given replay buffer.
    ///
    /// The control frequency of `env` fixes the checkpoint cadence and the
    /// cooldown in ticks for the lifetime of the wrapper.
    pub fn with_replay_buffer(env: E, config: &ExperienceReplayConfig, replay_buffer: R) -> Result<Self> {
        let control_freq = env.control_freq();
        config.validate(control_freq)?;
        let history = CheckpointHistory::build(&config.history, control_freq)?;

        Ok(Self {
            env,
            replay_buffer,
            history,
            episode: EpisodeState::Armed,
            last_commit_tick: None,
            last_reset: None,
            replay_buffer_sample_prob: config.replay_buffer_sample_prob,
            lookback_steps: config.lookback_steps(),
            cooldown_ticks: config.cooldown_ticks(control_freq),
            commit_once: config.commit_once_per_episode,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Performs an environment step.
    ///
    /// The step is passed through as is. The returned record gets the entries
    /// `replay_buffer_size` and `checkpoint_history_size`, and
    /// `replay_committed_tick` when a collision was committed.
    pub fn step(&mut self, a: &E::Act) -> (Step<E>, Record) {
        let (step, mut record) = self.env.step(a);
        let tick = self.env.tick();

        if self.is_commit_due(tick) {
            self.commit_lookback(tick, &mut record);
        }

        if self.is_capture_enabled() && self.history.is_capture_tick(tick) {
            self.history.record(&self.env, &step.obs, tick);
        }

        record.insert(
            "replay_buffer_size",
            RecordValue::Scalar(self.replay_buffer.len() as f32),
        );
        record.insert(
            "checkpoint_history_size",
            RecordValue::Scalar(self.history.len() as f32),
        );

        (step, record)
    }

    /// Starts a new episode, either fresh or from a replayed checkpoint.
    pub fn reset(&mut self) -> Result<E::Obs> {
        self.last_commit_tick = None;
        self.history.clear();

        let u: f64 = self.rng.gen();
        if u < self.replay_buffer_sample_prob
            && !self.replay_buffer.is_empty()
            && self.is_replay_active()
        {
            let (mut env, obs) = self.replay_buffer.sample()?.into_parts();
            env.set_scene(self.env.take_scene());
            info!("Replaying previous episode from tick {}", env.tick());
            self.env = env;
            self.episode = EpisodeState::Replayed;
            self.last_reset = Some(ResetKind::Replayed);
            Ok(obs)
        } else {
            let obs = self.env.reset()?;
            self.episode = EpisodeState::Armed;
            self.last_reset = Some(ResetKind::Fresh);
            Ok(obs)
        }
    }

    fn is_replay_active(&self) -> bool {
        self.env.use_replay_buffer() && self.env.activate_replay_buffer()
    }

    fn is_capture_enabled(&self) -> bool {
        self.is_replay_active() && self.episode.accepts_commits(self.commit_once)
    }

    fn is_commit_due(&self, tick: u64) -> bool {
        let collided = self.env.last_step_unique_collisions().iter().any(|&c| c);
        let grace_ticks = self.env.collisions_grace_period_sec() * self.env.control_freq() as f64;
        let cooled_down = match self.last_commit_tick {
            Some(last) => tick.saturating_sub(last) > self.cooldown_ticks,
            None => true,
        };

        collided
            && self.is_replay_active()
            && tick as f64 > grace_ticks
            && self.episode.accepts_commits(self.commit_once)
            && cooled_down
    }

    fn commit_lookback(&mut self, tick: u64, record: &mut Record) {
        match self.history.lookup_relative(self.lookback_steps) {
            Ok(cp) => {
                let cp = cp.clone();
                let cp_tick = cp.tick();
                self.replay_buffer.commit(cp);
                self.episode = EpisodeState::Committed;
                self.last_commit_tick = Some(tick);
                info!(
                    "Added collision event at tick {} to replay buffer (checkpoint from tick {}, {} stored)",
                    tick,
                    cp_tick,
                    self.replay_buffer.len()
                );
                record.insert("replay_committed_tick", RecordValue::Scalar(tick as f32));
            }
            Err(e) => warn!("{} at tick {}", e, tick),
        }
    }

    /// The live environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// The live environment, e.g. for switching replay on after a warm-up.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// The replay buffer.
    pub fn replay_buffer(&self) -> &R {
        &self.replay_buffer
    }

    /// The checkpoint history of the running episode.
    pub fn history(&self) -> &CheckpointHistory<E> {
        &self.history
    }

    /// State of the running episode.
    pub fn episode_state(&self) -> EpisodeState {
        self.episode
    }

    /// Tick of the last commit in the running episode.
    pub fn last_commit_tick(&self) -> Option<u64> {
        self.last_commit_tick
    }

    /// How the running episode was started; `None` before the first reset.
    pub fn last_reset(&self) -> Option<ResetKind> {
        self.last_reset
    }

    /// Unwraps the live environment and the replay buffer.
    pub fn into_inner(self) -> (E, R) {
        (self.env, self.replay_buffer)
    }
}

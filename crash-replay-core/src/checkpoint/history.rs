//! Rolling history of checkpoints.
use super::{Checkpoint, CheckpointHistoryConfig};
use crate::{error::CrashReplayError, Obs, SimEnv};
use log::debug;
use std::collections::{vec_deque, VecDeque};

/// Checkpoints of the running episode, oldest first.
///
/// A checkpoint is taken on every tick that is a multiple of
/// [`CheckpointHistory::interval_ticks`]. When the history is full the oldest
/// checkpoint is dropped, so it always covers the last `window_sec` seconds
/// of the episode at most.
pub struct CheckpointHistory<E: SimEnv> {
    checkpoints: VecDeque<Checkpoint<E>>,
    capacity: usize,
    interval_ticks: u64,
    total_recorded: usize,
}

impl<E: SimEnv> CheckpointHistory<E> {
    /// Builds an empty history for an environment running at `control_freq`
    /// ticks per second.
    pub fn build(
        config: &CheckpointHistoryConfig,
        control_freq: u64,
    ) -> Result<Self, CrashReplayError> {
        config.validate(control_freq)?;
        let capacity = config.capacity();

        Ok(Self {
            checkpoints: VecDeque::with_capacity(capacity),
            capacity,
            interval_ticks: config.interval_ticks(control_freq),
            total_recorded: 0,
        })
    }

    /// Ticks between two checkpoints.
    pub fn interval_ticks(&self) -> u64 {
        self.interval_ticks
    }

    /// Returns `true` if a checkpoint is due at `tick`.
    pub fn is_capture_tick(&self, tick: u64) -> bool {
        tick % self.interval_ticks == 0
    }

    /// Stores a copy of `env` and `obs` as the newest checkpoint.
    pub fn record(&mut self, env: &E, obs: &E::Obs, tick: u64) {
        if self.checkpoints.len() == self.capacity {
            self.checkpoints.pop_front();
        }
        self.checkpoints.push_back(Checkpoint::capture(env, obs, tick));
        self.total_recorded += 1;
        debug!(
            "Saved checkpoint of {} agents at tick {} ({} held)",
            obs.len(),
            tick,
            self.checkpoints.len()
        );
    }

    /// Returns the checkpoint `steps_ago` positions behind the newest one.
    ///
    /// `lookup_relative(1)` is the newest checkpoint. Fails with
    /// [`CrashReplayError::OutOfRange`] if fewer than `steps_ago` checkpoints
    /// are held, or if `steps_ago` is zero.
    pub fn lookup_relative(&self, steps_ago: usize) -> Result<&Checkpoint<E>, CrashReplayError> {
        let len = self.checkpoints.len();
        if steps_ago == 0 || steps_ago > len {
            return Err(CrashReplayError::OutOfRange { steps_ago, len });
        }
        Ok(&self.checkpoints[len - steps_ago])
    }

    /// Drops all checkpoints, e.g. at the start of an episode.
    pub fn clear(&mut self) {
        self.checkpoints.clear();
    }

    /// Number of checkpoints held.
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Returns `true` if no checkpoint is held.
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Maximum number of checkpoints held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of checkpoints recorded since construction, including dropped ones.
    pub fn total_recorded(&self) -> usize {
        self.total_recorded
    }

    /// Iterates over the checkpoints, oldest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, Checkpoint<E>> {
        self.checkpoints.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::CheckpointHistory;
    use crate::{
        dummy::{ScriptedAct, ScriptedEnv, ScriptedEnvConfig},
        error::CrashReplayError,
        CheckpointHistoryConfig, SimEnv,
    };

    fn history(control_freq: u64) -> CheckpointHistory<ScriptedEnv> {
        CheckpointHistory::build(&CheckpointHistoryConfig::default(), control_freq).unwrap()
    }

    fn env() -> ScriptedEnv {
        ScriptedEnv::build(&ScriptedEnvConfig::default(), 0).unwrap()
    }

    #[test]
    fn test_keeps_most_recent_in_order() {
        let mut history = history(10);
        let env = env();
        let obs = env.observe();
        assert_eq!(history.capacity(), 6);

        for tick in 1..=20 {
            history.record(&env, &obs, tick);
            assert!(history.len() <= history.capacity());
        }

        let ticks = history.iter().map(|cp| cp.tick()).collect::<Vec<_>>();
        assert_eq!(ticks, vec![15, 16, 17, 18, 19, 20]);
        assert_eq!(history.total_recorded(), 20);
    }

    #[test]
    fn test_lookup_relative() {
        let mut history = history(10);
        let env = env();
        let obs = env.observe();
        for tick in [5, 10, 15, 20] {
            history.record(&env, &obs, tick);
        }
        let len = history.len();

        assert_eq!(history.lookup_relative(1).unwrap().tick(), 20);
        assert_eq!(history.lookup_relative(3).unwrap().tick(), 10);
        assert_eq!(history.lookup_relative(len).unwrap().tick(), 5);
        assert_eq!(
            history.lookup_relative(len + 1).unwrap_err(),
            CrashReplayError::OutOfRange {
                steps_ago: len + 1,
                len
            }
        );
        assert!(history.lookup_relative(0).is_err());
    }

    #[test]
    fn test_cadence_over_fifty_steps() {
        // 0.5 s at 10 ticks per second
        let mut history = history(10);
        assert_eq!(history.interval_ticks(), 5);

        let mut env = env();
        env.reset().unwrap();
        let act = ScriptedAct::idle(env.n_agents());
        for _ in 0..50 {
            let (step, _) = env.step(&act);
            if history.is_capture_tick(env.tick()) {
                history.record(&env, &step.obs, env.tick());
            }
        }

        assert_eq!(history.total_recorded(), 10);
        assert_eq!(history.len(), 6);
        let ticks = history.iter().map(|cp| cp.tick()).collect::<Vec<_>>();
        assert_eq!(ticks, vec![25, 30, 35, 40, 45, 50]);
    }

    #[test]
    fn test_checkpoint_is_independent_of_live_env() {
        let mut history = history(10);
        let mut env = env();
        let obs = env.reset().unwrap();
        history.record(&env, &obs, env.tick());

        let act = ScriptedAct::idle(env.n_agents());
        for _ in 0..7 {
            env.step(&act);
        }

        let cp = history.lookup_relative(1).unwrap();
        assert_eq!(cp.env().tick(), 0);
        assert_eq!(cp.obs().tick, 0);
        assert_eq!(env.tick(), 7);
    }

    #[test]
    fn test_clear() {
        let mut history = history(10);
        let env = env();
        let obs = env.observe();
        history.record(&env, &obs, 5);
        history.clear();

        assert!(history.is_empty());
        assert!(history.lookup_relative(1).is_err());
        assert_eq!(history.total_recorded(), 1);
    }
}

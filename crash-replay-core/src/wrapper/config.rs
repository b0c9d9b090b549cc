//! Configuration of [`ExperienceReplayWrapper`](super::ExperienceReplayWrapper).
use crate::{error::CrashReplayError, CheckpointHistoryConfig, CollisionReplayBufferConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ExperienceReplayWrapper`](super::ExperienceReplayWrapper).
///
/// # Examples
///
/// ```rust
/// use crash_replay_core::{CollisionReplayBufferConfig, ExperienceReplayConfig};
///
/// let config = ExperienceReplayConfig::default()
///     .replay_buffer_sample_prob(0.5)
///     .replay_buffer(CollisionReplayBufferConfig::default().capacity(20));
/// assert!(config.validate(10).is_ok());
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ExperienceReplayConfig {
    /// Probability that a reset starts from a replayed checkpoint.
    pub replay_buffer_sample_prob: f64,

    /// Lead time between the committed checkpoint and the collision.
    pub save_time_before_collision_sec: f64,

    /// Minimum simulated time between two commits.
    pub commit_cooldown_sec: f64,

    /// If `true`, an episode stops taking checkpoints and committing after its
    /// first commit. If `false`, only the cooldown separates commits.
    pub commit_once_per_episode: bool,

    /// Seed of the random numbers deciding whether to replay at reset.
    pub seed: u64,

    /// Checkpoint history.
    pub history: CheckpointHistoryConfig,

    /// Replay buffer.
    pub replay_buffer: CollisionReplayBufferConfig,
}

impl Default for ExperienceReplayConfig {
    fn default() -> Self {
        Self {
            replay_buffer_sample_prob: 0.0,
            save_time_before_collision_sec: 1.5,
            commit_cooldown_sec: 2.0,
            commit_once_per_episode: true,
            seed: 42,
            history: CheckpointHistoryConfig::default(),
            replay_buffer: CollisionReplayBufferConfig::default(),
        }
    }
}

impl ExperienceReplayConfig {
    /// Sets the probability of replaying at reset.
    pub fn replay_buffer_sample_prob(mut self, v: f64) -> Self {
        self.replay_buffer_sample_prob = v;
        self
    }

    /// Sets the lead time before a collision.
    pub fn save_time_before_collision_sec(mut self, v: f64) -> Self {
        self.save_time_before_collision_sec = v;
        self
    }

    /// Sets the minimum time between two commits.
    pub fn commit_cooldown_sec(mut self, v: f64) -> Self {
        self.commit_cooldown_sec = v;
        self
    }

    /// Sets whether an episode commits at most once.
    pub fn commit_once_per_episode(mut self, v: bool) -> Self {
        self.commit_once_per_episode = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the configuration of the checkpoint history.
    pub fn history(mut self, history: CheckpointHistoryConfig) -> Self {
        self.history = history;
        self
    }

    /// Sets the configuration of the replay buffer.
    pub fn replay_buffer(mut self, replay_buffer: CollisionReplayBufferConfig) -> Self {
        self.replay_buffer = replay_buffer;
        self
    }

    /// Number of checkpoints between the committed one and the collision.
    pub fn lookback_steps(&self) -> usize {
        self.history.steps_for(self.save_time_before_collision_sec)
    }

    /// Minimum number of ticks between two commits.
    pub fn cooldown_ticks(&self, control_freq: u64) -> u64 {
        (self.commit_cooldown_sec * control_freq as f64).round() as u64
    }

    /// Checks the configuration against the control frequency of an environment.
    pub fn validate(&self, control_freq: u64) -> Result<(), CrashReplayError> {
        self.history.validate(control_freq)?;

        if !(0.0..=1.0).contains(&self.replay_buffer_sample_prob) {
            return Err(CrashReplayError::InvalidConfig(format!(
                "replay_buffer_sample_prob must be in [0, 1], got {}",
                self.replay_buffer_sample_prob
            )));
        }
        if self.replay_buffer.capacity == 0 {
            return Err(CrashReplayError::InvalidConfig(
                "replay buffer capacity must be positive".to_string(),
            ));
        }
        if !(self.commit_cooldown_sec.is_finite() && self.commit_cooldown_sec >= 0.0) {
            return Err(CrashReplayError::InvalidConfig(format!(
                "commit_cooldown_sec must be non-negative, got {}",
                self.commit_cooldown_sec
            )));
        }

        let steps = self.lookback_steps();
        if steps == 0 {
            return Err(CrashReplayError::InvalidConfig(format!(
                "save_time_before_collision_sec ({}) is shorter than one checkpoint interval ({})",
                self.save_time_before_collision_sec, self.history.cp_step_size_sec
            )));
        }
        if steps > self.history.capacity() {
            return Err(CrashReplayError::InvalidConfig(format!(
                "save_time_before_collision_sec ({}) reaches past the history window ({})",
                self.save_time_before_collision_sec, self.history.window_sec
            )));
        }
        Ok(())
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ExperienceReplayConfig;
    use crate::{error::CrashReplayError, CheckpointHistoryConfig, CollisionReplayBufferConfig};
    use anyhow::Result;
    use tempdir::TempDir;

    #[test]
    fn test_defaults() {
        let config = ExperienceReplayConfig::default();
        assert_eq!(config.lookback_steps(), 3);
        assert_eq!(config.cooldown_ticks(10), 20);
        assert_eq!(config.replay_buffer.capacity, 100);
        assert!(config.validate(10).is_ok());
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let tmp_dir = TempDir::new("experience_replay_config")?;
        let path = tmp_dir.path().join("config.yaml");
        let config = ExperienceReplayConfig::default()
            .replay_buffer_sample_prob(0.25)
            .commit_once_per_episode(false)
            .history(CheckpointHistoryConfig::default().cp_step_size_sec(0.25))
            .replay_buffer(CollisionReplayBufferConfig::default().capacity(8).seed(3));

        config.save(&path)?;
        let loaded = ExperienceReplayConfig::load(&path)?;
        assert_eq!(config, loaded);
        Ok(())
    }

    #[test]
    fn test_validate_rejects() {
        let invalid = [
            ExperienceReplayConfig::default().replay_buffer_sample_prob(1.5),
            ExperienceReplayConfig::default()
                .replay_buffer(CollisionReplayBufferConfig::default().capacity(0)),
            ExperienceReplayConfig::default().commit_cooldown_sec(-1.0),
            ExperienceReplayConfig::default().save_time_before_collision_sec(0.2),
            ExperienceReplayConfig::default().save_time_before_collision_sec(4.0),
        ];
        for config in invalid.iter() {
            assert!(
                matches!(config.validate(10), Err(CrashReplayError::InvalidConfig(_))),
                "{:?} should be rejected",
                config
            );
        }
    }
}

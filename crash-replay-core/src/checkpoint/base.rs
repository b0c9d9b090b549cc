//! Checkpoint.
use crate::SimEnv;
use std::fmt;

/// A snapshot of an environment and its observation at a given tick.
///
/// The snapshot owns its data. It is created by cloning the live environment
/// and nothing it holds is shared with the environment it was taken from.
pub struct Checkpoint<E: SimEnv> {
    env: E,
    obs: E::Obs,
    tick: u64,
}

impl<E: SimEnv> Checkpoint<E> {
    /// Copies the live environment and observation.
    pub fn capture(env: &E, obs: &E::Obs, tick: u64) -> Self {
        Self {
            env: env.clone(),
            obs: obs.clone(),
            tick,
        }
    }

    /// The stored environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// The stored observation.
    pub fn obs(&self) -> &E::Obs {
        &self.obs
    }

    /// Tick at which the snapshot was taken.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Splits the checkpoint into the environment and the observation.
    pub fn into_parts(self) -> (E, E::Obs) {
        (self.env, self.obs)
    }
}

impl<E: SimEnv> Clone for Checkpoint<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            obs: self.obs.clone(),
            tick: self.tick,
        }
    }
}

impl<E: SimEnv> fmt::Debug for Checkpoint<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkpoint")
            .field("tick", &self.tick)
            .field("obs", &self.obs)
            .finish_non_exhaustive()
    }
}

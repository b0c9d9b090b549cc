//! Environment step.
use super::SimEnv;

/// Additional information to `Obs` and `Act`.
pub trait Info {}

impl Info for () {}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// Rewards and done flags hold one entry per agent.
pub struct Step<E: SimEnv> {
    /// Action.
    pub act: E::Act,

    /// Observation.
    pub obs: E::Obs,

    /// Reward.
    pub reward: Vec<f32>,

    /// Flag denoting if episode is terminated.
    pub is_terminated: Vec<i8>,

    /// Flag denoting if episode is truncated.
    pub is_truncated: Vec<i8>,

    /// Information defined by user.
    pub info: E::Info,
}

impl<E: SimEnv> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: Vec<f32>,
        is_terminated: Vec<i8>,
        is_truncated: Vec<i8>,
        info: E::Info,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated for any agent.
    pub fn is_done(&self) -> bool {
        self.is_terminated.iter().any(|&d| d == 1) || self.is_truncated.iter().any(|&d| d == 1)
    }
}

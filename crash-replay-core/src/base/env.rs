//! Simulation environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// A multi-agent simulation observed by the experience replay wrapper.
///
/// The wrapper treats the simulation as opaque. It reads the timing and
/// collision signals below after each step, clones the whole environment to
/// take a checkpoint, and swaps in a stored clone when an episode is replayed.
///
/// `Clone` is the checkpointing mechanism: a clone must own all of the
/// physics and dynamics state, so that stepping the live environment never
/// changes a stored checkpoint. Rendering resources are the exception. They
/// are reached through [`SimEnv::take_scene`] and [`SimEnv::set_scene`] and a
/// clone is not expected to carry them.
pub trait SimEnv: Clone {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Handle to rendering resources owned by the live environment.
    type Scene;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Performs an environment step.
    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized;

    /// Starts a new episode and returns its first observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Current simulated tick, counted from the start of the episode.
    fn tick(&self) -> u64;

    /// Number of ticks per simulated second.
    fn control_freq(&self) -> u64;

    /// Collision flags raised by the last step, one per agent or agent pair.
    ///
    /// A flag is set only for collisions that started at that step, so a
    /// contact lasting several ticks is reported once.
    fn last_step_unique_collisions(&self) -> &[bool];

    /// Seconds at the start of an episode during which collisions are ignored.
    fn collisions_grace_period_sec(&self) -> f64;

    /// Whether experience replay is enabled at all.
    fn use_replay_buffer(&self) -> bool;

    /// Whether experience replay is active at this point of training.
    ///
    /// Typically switched on after a warm-up period by the training loop.
    fn activate_replay_buffer(&self) -> bool;

    /// Detaches the rendering handle, leaving `None` in its place.
    fn take_scene(&mut self) -> Option<Self::Scene>;

    /// Attaches a rendering handle.
    fn set_scene(&mut self, scene: Option<Self::Scene>);
}

//! Core functionalities.
mod env;
mod policy;
mod replay_buffer;
mod step;
pub use env::SimEnv;
pub use policy::Policy;
pub use replay_buffer::ReplayBufferBase;
use std::fmt::Debug;
pub use step::{Info, Step};

/// Observations emitted by a multi-agent environment.
///
/// A checkpoint stores an observation next to the environment state, and a
/// replayed episode starts from that stored value. The `Clone` implementation
/// must therefore produce a copy that shares no mutable data with the original.
pub trait Obs: Clone + Debug {
    /// Returns the number of agents covered by the observation.
    fn len(&self) -> usize;
}

/// Actions of a multi-agent environment.
pub trait Act: Clone + Debug {
    /// Returns the number of agents covered by the action.
    fn len(&self) -> usize;
}

//! Replay buffer interface for collision events.
//!
//! A replay buffer here stores whole checkpoints rather than transitions.
//! Entries are committed one at a time when a collision is detected and drawn
//! one at a time when an episode is replayed.
use crate::error::CrashReplayError;

/// Interface for buffers holding checkpoints to be replayed.
///
/// The eviction policy is left to implementors. The experience replay
/// wrapper only relies on the operations below.
///
/// # Examples
///
/// ```ignore
/// struct LastOnly<T>(Option<T>);
///
/// impl<T: Clone> ReplayBufferBase for LastOnly<T> {
///     type Config = ();
///     type Item = T;
///
///     fn build(_config: &()) -> Self {
///         Self(None)
///     }
///
///     fn commit(&mut self, item: T) {
///         self.0 = Some(item);
///     }
///
///     fn sample(&mut self) -> Result<T, CrashReplayError> {
///         self.0.clone().ok_or(CrashReplayError::EmptyBuffer)
///     }
///
///     fn len(&self) -> usize {
///         self.0.is_some() as usize
///     }
/// }
/// ```
pub trait ReplayBufferBase {
    /// Configuration parameters for the replay buffer.
    type Config: Clone;

    /// The type of items stored in the buffer.
    type Item;

    /// Builds a new replay buffer from the given configuration.
    fn build(config: &Self::Config) -> Self;

    /// Stores an item. Always succeeds; a full buffer makes room itself.
    fn commit(&mut self, item: Self::Item);

    /// Returns an independent copy of a stored item.
    ///
    /// Fails with [`CrashReplayError::EmptyBuffer`] when nothing is stored.
    /// Callers are expected to check [`ReplayBufferBase::is_empty`] first.
    fn sample(&mut self) -> Result<Self::Item, CrashReplayError>;

    /// Returns the number of items currently stored.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

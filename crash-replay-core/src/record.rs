//! Types and traits for recording diagnostics of the replay machinery.
//!
//! Every environment step returns a [`Record`] next to the [`Step`](crate::Step).
//! The experience replay wrapper merges its own entries into that record:
//!
//! * `replay_buffer_size` - number of checkpoints in the replay buffer
//! * `checkpoint_history_size` - number of checkpoints held for the episode
//! * `replay_committed_tick` - tick of the collision, only on a commit step
//!
//! # Basic Usage
//!
//! ```rust
//! use crash_replay_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("tick", RecordValue::Scalar(120.0));
//! record.insert("collisions", RecordValue::Array1(vec![0.0, 1.0, 0.0]));
//! assert_eq!(record.get_scalar("tick").unwrap(), 120.0);
//! ```
mod base;
mod buffered_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use recorder::Recorder;

//! Per-episode state of the experience replay wrapper.

/// Where the running episode stands with respect to the replay buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeState {
    /// Started by a fresh reset and nothing committed yet. Checkpoints are
    /// taken and a collision may be committed.
    Armed,

    /// The episode has contributed a checkpoint to the replay buffer.
    Committed,

    /// Started from a checkpoint drawn from the replay buffer. Such an episode
    /// neither takes checkpoints nor commits; only a fresh reset re-arms.
    Replayed,
}

impl EpisodeState {
    /// Returns `true` if the episode may take checkpoints and commit.
    ///
    /// `commit_once` selects whether a committed episode is done with the
    /// replay buffer.
    pub fn accepts_commits(&self, commit_once: bool) -> bool {
        match self {
            EpisodeState::Armed => true,
            EpisodeState::Committed => !commit_once,
            EpisodeState::Replayed => false,
        }
    }
}

/// How the last episode was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// The environment's own reset.
    Fresh,

    /// A checkpoint drawn from the replay buffer.
    Replayed,
}

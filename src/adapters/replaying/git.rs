//! Replaying adapter for the `GitRepo` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Replays recorded git operations from a cassette.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitRepo {
    /// Creates a new replaying git repo from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl GitRepo for ReplayingGitRepo {
    fn current_commit(&self) -> Result<String, PortError> {
        replay_result(&next_output(&self.replayer, "git", "current_commit"), "git::current_commit")
    }

    fn diff(&self) -> Result<String, PortError> {
        replay_result(&next_output(&self.replayer, "git", "diff"), "git::diff")
    }

    fn stage_all(&self) -> Result<(), PortError> {
        replay_result(&next_output(&self.replayer, "git", "stage_all"), "git::stage_all")
    }

    fn commit(&self, _message: &str) -> Result<(), PortError> {
        replay_result(&next_output(&self.replayer, "git", "commit"), "git::commit")
    }

    fn push(&self) -> Result<(), PortError> {
        replay_result(&next_output(&self.replayer, "git", "push"), "git::push")
    }
}

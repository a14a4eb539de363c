//! Replaying adapter for the `RepoHost` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{HostFuture, NewRepo, RepoHost};

/// Serves recorded repository host replies from a cassette.
pub struct ReplayingRepoHost {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingRepoHost {
    /// Create a replaying host backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    /// Interactions the run has not consumed yet.
    ///
    /// # Panics
    ///
    /// Panics if the replayer lock is poisoned.
    #[must_use]
    pub fn pending_calls(&self) -> usize {
        self.replayer.lock().expect("replayer lock poisoned").pending().len()
    }
}

impl RepoHost for ReplayingRepoHost {
    fn get_repo(&self, _token: &str, _owner: &str, _name: &str) -> HostFuture<'_> {
        let output = next_output(&self.replayer, "host", "get_repo");
        Box::pin(async move { replay_result(&output, "host::get_repo") })
    }

    fn create_repo(&self, _token: &str, _repo: &NewRepo) -> HostFuture<'_> {
        let output = next_output(&self.replayer, "host", "create_repo");
        Box::pin(async move { replay_result(&output, "host::create_repo") })
    }
}

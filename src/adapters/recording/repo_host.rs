//! Recording adapter for the `RepoHost` port. Tokens are never written to cassettes.

use std::sync::Arc;

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{HostFuture, NewRepo, RepoHost};

/// Records repository host interactions while delegating to an inner implementation.
pub struct RecordingRepoHost {
    inner: Box<dyn RepoHost>,
    recorder: SharedRecorder,
}

impl RecordingRepoHost {
    /// Creates a new recording host wrapping the given implementation.
    pub fn new(inner: Box<dyn RepoHost>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RepoInput {
    owner: String,
    name: String,
}

impl RepoHost for RecordingRepoHost {
    fn get_repo(&self, token: &str, owner: &str, name: &str) -> HostFuture<'_> {
        let input = RepoInput { owner: owner.to_string(), name: name.to_string() };
        let pending = self.inner.get_repo(token, owner, name);
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = pending.await;
            record_result(&recorder, "host", "get_repo", &input, &result);
            result
        })
    }

    fn create_repo(&self, token: &str, repo: &NewRepo) -> HostFuture<'_> {
        let input = repo.clone();
        let pending = self.inner.create_repo(token, repo);
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = pending.await;
            record_result(&recorder, "host", "create_repo", &input, &result);
            result
        })
    }
}

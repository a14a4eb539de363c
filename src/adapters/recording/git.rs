//! Recording adapter for the `GitRepo` port.

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{GitRepo, PortError};

/// Records git interactions while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: SharedRecorder,
}

impl RecordingGitRepo {
    /// Creates a new recording git repo wrapping the given implementation.
    pub fn new(inner: Box<dyn GitRepo>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct CommitInput<'a> {
    message: &'a str,
}

impl GitRepo for RecordingGitRepo {
    fn current_commit(&self) -> Result<String, PortError> {
        let result = self.inner.current_commit();
        record_result(&self.recorder, "git", "current_commit", &(), &result);
        result
    }

    fn diff(&self) -> Result<String, PortError> {
        let result = self.inner.diff();
        record_result(&self.recorder, "git", "diff", &(), &result);
        result
    }

    fn stage_all(&self) -> Result<(), PortError> {
        let result = self.inner.stage_all();
        record_result(&self.recorder, "git", "stage_all", &(), &result);
        result
    }

    fn commit(&self, message: &str) -> Result<(), PortError> {
        let result = self.inner.commit(message);
        record_result(&self.recorder, "git", "commit", &CommitInput { message }, &result);
        result
    }

    fn push(&self) -> Result<(), PortError> {
        let result = self.inner.push();
        record_result(&self.recorder, "git", "push", &(), &result);
        result
    }
}

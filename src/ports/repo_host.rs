//! Repository host port (GitHub REST API).
//!
//! The port reports raw HTTP status and body; deciding what a 404 or a 422
//! means is left to the provisioner.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use super::PortError;

/// Boxed future returned by [`RepoHost`] methods.
pub type HostFuture<'a> = Pin<Box<dyn Future<Output = Result<HostReply, PortError>> + Send + 'a>>;

/// Status and body of a repository host response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostReply {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    #[serde(default)]
    pub body: String,
}

impl HostReply {
    /// Returns `true` for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Payload for creating a repository owned by the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRepo {
    /// Repository name (already slugified).
    pub name: String,
    /// Whether the repository is private.
    pub private: bool,
    /// Repository description.
    pub description: String,
}

/// Talks to a repository hosting service on behalf of a token holder.
///
/// Transport failures (DNS, TLS, connection reset) are errors; every
/// HTTP response, whatever its status, is a successful [`HostReply`].
pub trait RepoHost: Send + Sync {
    /// Looks up `owner/name` (`GET /repos/{owner}/{name}`).
    fn get_repo(&self, token: &str, owner: &str, name: &str) -> HostFuture<'_>;

    /// Creates a repository for the token holder (`POST /user/repos`).
    fn create_repo(&self, token: &str, repo: &NewRepo) -> HostFuture<'_>;
}

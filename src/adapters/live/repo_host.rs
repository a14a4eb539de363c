//! Live adapter for the `RepoHost` port backed by the GitHub REST API.

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder};

use crate::ports::repo_host::{HostFuture, HostReply, NewRepo, RepoHost};
use crate::ports::PortError;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!("repodoc/", env!("CARGO_PKG_VERSION"));

/// GitHub (or GitHub Enterprise) REST client.
pub struct GitHubHost {
    client: Client,
    api_url: String,
}

impl GitHubHost {
    /// Creates a client for the given API root, e.g. `https://api.github.com`.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self { client: Client::new(), api_url: api_url.into().trim_end_matches('/').to_string() }
    }

    fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("token {token}"))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT)
    }
}

/// Sends a request and captures status plus body, whatever the status.
async fn send(builder: RequestBuilder) -> Result<HostReply, PortError> {
    let response =
        builder.send().await.map_err(|e| format!("GitHub API request failed: {e}"))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| format!("failed to read GitHub API response: {e}"))?;
    Ok(HostReply { status, body })
}

impl RepoHost for GitHubHost {
    fn get_repo(&self, token: &str, owner: &str, name: &str) -> HostFuture<'_> {
        let url = format!("{}/repos/{owner}/{name}", self.api_url);
        let builder = Self::authorized(self.client.get(url), token);
        Box::pin(send(builder))
    }

    fn create_repo(&self, token: &str, repo: &NewRepo) -> HostFuture<'_> {
        let url = format!("{}/user/repos", self.api_url);
        let builder = Self::authorized(self.client.post(url), token).json(repo);
        Box::pin(send(builder))
    }
}

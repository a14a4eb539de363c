//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{GitHubHost, LiveFileSystem, LiveGitRepo, OpenAiClient};
use crate::adapters::recording::{
    RecordingFileSystem, RecordingGitRepo, RecordingLlmClient, RecordingRepoHost,
};
use crate::adapters::replaying::{
    ReplayingFileSystem, ReplayingGitRepo, ReplayingLlmClient, ReplayingRepoHost,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::ports::{
    CompletionRequest, FileSystem, GitRepo, HostFuture, LlmClient, LlmFuture, NewRepo, PortError,
    RepoHost,
};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Filesystem for reading the project and writing generated docs.
    pub fs: Box<dyn FileSystem>,
    /// Git working tree of the project being deployed.
    pub git: Box<dyn GitRepo>,
    /// Text-generation service.
    pub llm: Box<dyn LlmClient>,
    /// Repository hosting API.
    pub host: Box<dyn RepoHost>,
}

impl ServiceContext {
    /// Creates a live context. Git commands run inside `root`.
    #[must_use]
    pub fn live(settings: &Settings, root: &Path) -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo::new(root)),
            llm: Box::new(OpenAiClient::new(
                settings.openai_base_url.clone(),
                settings.openai_api_key.clone(),
            )),
            host: Box::new(GitHubHost::new(settings.github_api_url.clone())),
        }
    }

    /// Creates a live context whose traffic is captured into a new
    /// recording session under `dir`.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(
        dir: &Path,
        settings: &Settings,
        root: &Path,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new_in(dir, root)?;
        let live = Self::live(settings, root);

        let ctx = Self {
            fs: Box::new(RecordingFileSystem::new(live.fs, session.fs.clone())),
            git: Box::new(RecordingGitRepo::new(live.git, session.git.clone())),
            llm: Box::new(RecordingLlmClient::new(live.llm, session.llm.clone())),
            host: Box::new(RecordingRepoHost::new(live.host, session.host.clone())),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer over the same cassette so that
    /// per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: crate::cassette::format::Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;

        Ok(Self {
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            git: Box::new(ReplayingGitRepo::new(CassetteReplayer::new(&cassette))),
            llm: Box::new(ReplayingLlmClient::new(CassetteReplayer::new(&cassette))),
            host: Box::new(ReplayingRepoHost::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use a panicking adapter that
    /// fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(Unconfigured),
            },
            git: match replayers.git {
                Some(r) => Box::new(ReplayingGitRepo::new(r)),
                None => Box::new(Unconfigured),
            },
            llm: match replayers.llm {
                Some(r) => Box::new(ReplayingLlmClient::new(r)),
                None => Box::new(Unconfigured),
            },
            host: match replayers.host {
                Some(r) => Box::new(ReplayingRepoHost::new(r)),
                None => Box::new(Unconfigured),
            },
        })
    }
}

// --- Panicking adapter for ports without a cassette ---

struct Unconfigured;

fn unconfigured(port: &str) -> ! {
    panic!("{port} port not configured in CassetteConfig: no cassette loaded for {port}");
}

impl FileSystem for Unconfigured {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        unconfigured("fs")
    }
    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        unconfigured("fs")
    }
    fn list_files(&self, _dir: &Path) -> Result<Vec<String>, PortError> {
        unconfigured("fs")
    }
}

impl GitRepo for Unconfigured {
    fn current_commit(&self) -> Result<String, PortError> {
        unconfigured("git")
    }
    fn diff(&self) -> Result<String, PortError> {
        unconfigured("git")
    }
    fn stage_all(&self) -> Result<(), PortError> {
        unconfigured("git")
    }
    fn commit(&self, _message: &str) -> Result<(), PortError> {
        unconfigured("git")
    }
    fn push(&self) -> Result<(), PortError> {
        unconfigured("git")
    }
}

impl LlmClient for Unconfigured {
    fn complete(&self, _request: &CompletionRequest) -> LlmFuture<'_> {
        unconfigured("llm")
    }
}

impl RepoHost for Unconfigured {
    fn get_repo(&self, _token: &str, _owner: &str, _name: &str) -> HostFuture<'_> {
        unconfigured("host")
    }
    fn create_repo(&self, _token: &str, _repo: &NewRepo) -> HostFuture<'_> {
        unconfigured("host")
    }
}

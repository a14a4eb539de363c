//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a path are left unconfigured
/// and panic if a replayed run calls them.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
    /// Path to the git port cassette file.
    pub git: Option<PathBuf>,
    /// Path to the LLM port cassette file.
    pub llm: Option<PathBuf>,
    /// Path to the repository host port cassette file.
    pub host: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the git port.
    pub git: Option<CassetteReplayer>,
    /// Replayer for the LLM port.
    pub llm: Option<CassetteReplayer>,
    /// Replayer for the repository host port.
    pub host: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Reads a recording session directory laid out by
    /// [`RecordingSession`](super::session::RecordingSession): every
    /// `<port>.cassette.yaml` present is configured, missing ones stay `None`.
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        let port = |name: &str| {
            let path = dir.join(format!("{name}.cassette.yaml"));
            path.exists().then_some(path)
        };
        Self { fs: port("fs"), git: port("git"), llm: port("llm"), host: port("host") }
    }

    /// Load a cassette file and create a replayer for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<CassetteReplayer, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(CassetteReplayer::new(&cassette))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            fs: self.fs.as_deref().map(Self::load).transpose()?,
            git: self.git.as_deref().map(Self::load).transpose()?,
            llm: self.llm.as_deref().map(Self::load).transpose()?,
            host: self.host.as_deref().map(Self::load).transpose()?,
        })
    }
}

//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::warn;

use super::recorder::CassetteRecorder;

/// Shared handle adapters use to append to a recorder.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Per-port recorders for one run, written to `<base>/<timestamp>/<port>.cassette.yaml`.
pub struct RecordingSession {
    /// Recorder for filesystem interactions.
    pub fs: SharedRecorder,
    /// Recorder for git interactions.
    pub git: SharedRecorder,
    /// Recorder for LLM interactions.
    pub llm: SharedRecorder,
    /// Recorder for repository host interactions.
    pub host: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session in a new timestamped subdirectory of `base`.
    ///
    /// Cassettes are stamped with the `HEAD` commit of `project_root`, the
    /// working tree the recorded command operates on.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamped directory already exists or
    /// cannot be created.
    pub fn new_in(base: &Path, project_root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let commit = commit_hash(project_root);
        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, commit.as_str())))
        };

        Ok(Self {
            fs: make_recorder("fs"),
            git: make_recorder("git"),
            llm: make_recorder("llm"),
            host: make_recorder("host"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every port's cassette. The recording adapters must have been
    /// dropped first so the recorders are no longer shared.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still referenced or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(shared: SharedRecorder, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(shared)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.fs, "fs")?;
        finish_one(self.git, "git")?;
        finish_one(self.llm, "llm")?;
        finish_one(self.host, "host")?;

        Ok(self.output_dir)
    }
}

/// Current commit of `root`, or `unknown` when there is none.
fn commit_hash(root: &Path) -> String {
    let hash = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(root)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    hash.unwrap_or_else(|| {
        warn!("could not read git commit hash for cassette metadata, using 'unknown'");
        "unknown".to_string()
    })
}

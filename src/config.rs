//! Runtime settings resolved from the environment.
//!
//! `main` loads an optional `.env` file through `dotenvy` before these are
//! read, so every value can live either in the shell or next to the project.

use std::env;
use std::path::PathBuf;

/// Default OpenAI-compatible API root.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
/// Default chat model for documentation drafts.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Default GitHub REST API root.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Settings shared by all commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// API key for the text-generation service (`OPENAI_API_KEY`).
    pub openai_api_key: Option<String>,
    /// Root URL of the text-generation service (`OPENAI_BASE_URL`).
    pub openai_base_url: String,
    /// Chat model identifier (`REPODOC_MODEL`).
    pub model: String,
    /// Root URL of the repository host API (`GITHUB_API_URL`).
    pub github_api_url: String,
    /// When set, port traffic is recorded to cassettes under this directory (`REPODOC_RECORD`).
    pub record_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            record_dir: None,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL")
                .map_or(defaults.openai_base_url, |url| url.trim_end_matches('/').to_string()),
            model: get("REPODOC_MODEL").unwrap_or(defaults.model),
            github_api_url: get("GITHUB_API_URL")
                .map_or(defaults.github_api_url, |url| url.trim_end_matches('/').to_string()),
            record_dir: get("REPODOC_RECORD").map(PathBuf::from),
        }
    }
}

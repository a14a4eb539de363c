//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (filesystem, git, text generation, repository host).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod git;
pub mod llm;
pub mod repo_host;

pub use filesystem::FileSystem;
pub use git::GitRepo;
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};
pub use repo_host::{HostFuture, HostReply, NewRepo, RepoHost};

/// Error type returned by every port method.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

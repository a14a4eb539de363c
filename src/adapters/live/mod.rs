//! Live adapters for real external interactions.

pub mod filesystem;
pub mod git;
pub mod llm;
pub mod repo_host;

pub use filesystem::LiveFileSystem;
pub use git::LiveGitRepo;
pub use llm::OpenAiClient;
pub use repo_host::GitHubHost;

//! Replaying adapters that serve recorded interactions from cassettes.

pub mod filesystem;
pub mod git;
pub mod llm;
pub mod repo_host;

pub use filesystem::ReplayingFileSystem;
pub use git::ReplayingGitRepo;
pub use llm::ReplayingLlmClient;
pub use repo_host::ReplayingRepoHost;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

/// Takes the next recorded output for `port::method`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output.clone()
}

/// Turns a recorded `{"ok": v}` / `{"err": "msg"}` output back into a `Result`.
///
/// A bare value without either key is treated as `ok`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

//! On-disk cassette layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One call made through a port, with what went in and what came back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position within the cassette, assigned by the recorder.
    pub seq: u64,
    /// Port name: `fs`, `git`, `llm` or `host`.
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Call arguments. Credentials are never recorded.
    pub input: serde_json::Value,
    /// Returned value, using the `{"ok": ..}` / `{"err": ".."}` convention for fallible calls.
    pub output: serde_json::Value,
}

/// A named, ordered list of interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Commit of the working directory at recording time, or `unknown`.
    pub commit: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

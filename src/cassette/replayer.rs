//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Serves a cassette's interactions in order, one queue per port/method pair.
///
/// Calls to different methods may interleave freely; calls to the same
/// method are answered in the order they were recorded.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the pair. An
    /// unexpected call is a test failure, so the message lists what the
    /// cassette does contain.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        assert!(
            *cursor < queue.len(),
            "Cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
             have been consumed. Last interaction was seq={last_seq}.",
            count = queue.len(),
            last_seq = queue.last().map_or(0, |i| i.seq),
        );

        let interaction = &queue[*cursor];
        *cursor += 1;
        interaction
    }

    /// Interactions that have not been served yet, sorted by `seq`.
    #[must_use]
    pub fn pending(&self) -> Vec<&Interaction> {
        let mut pending: Vec<&Interaction> = self
            .queues
            .iter()
            .flat_map(|(key, queue)| {
                let served = self.cursors.get(key).copied().unwrap_or(0);
                queue.iter().skip(served)
            })
            .collect();
        pending.sort_by_key(|i| i.seq);
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions }
    }

    #[test]
    fn serves_each_method_in_recorded_order() {
        let cassette = make_cassette(vec![
            interaction(0, "llm", "complete", json!({"ok": {"text": "readme"}})),
            interaction(1, "git", "diff", json!({"ok": ""})),
            interaction(2, "llm", "complete", json!({"ok": {"text": "docs"}})),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("git", "diff").seq, 1);
        assert_eq!(replayer.next_interaction("llm", "complete").seq, 0);
        assert_eq!(replayer.next_interaction("llm", "complete").seq, 2);
        assert!(replayer.pending().is_empty());
    }

    #[test]
    fn pending_lists_unserved_interactions() {
        let cassette = make_cassette(vec![
            interaction(0, "host", "get_repo", json!({"ok": {"status": 404}})),
            interaction(1, "host", "create_repo", json!({"ok": {"status": 201}})),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("host", "get_repo");

        let pending = replayer.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].method, "create_repo");
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_replayer_panics_with_descriptive_message() {
        let cassette = make_cassette(vec![interaction(0, "git", "push", json!({"ok": null}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("git", "push");
        let _ = replayer.next_interaction("git", "push");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_method_panics() {
        let cassette = make_cassette(vec![]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("host", "create_repo");
    }
}

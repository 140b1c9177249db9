//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays interactions from a loaded cassette, serving them sequentially
/// per `port::method` pair.
pub struct CassetteReplayer {
    /// Pending interactions keyed by `(port, method)`, oldest first.
    queues: HashMap<(String, String), VecDeque<Interaction>>,
    /// Last interaction handed out, kept so callers can borrow it.
    current: Option<Interaction>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues, current: None }
    }

    /// Number of interactions not yet served, across all ports.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination, naming what was requested and what the
    /// cassette does contain.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = (port.to_string(), method.to_string());
        if !self.queues.contains_key(&key) {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        }

        let Some(interaction) = self.queues.get_mut(&key).and_then(VecDeque::pop_front) else {
            panic!(
                "Cassette exhausted: all interactions for port={port:?} method={method:?} \
                 have been consumed."
            );
        };
        self.current.insert(interaction)
    }
}

//! Replaying adapter for the Clock port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Option<Mutex<CassetteReplayer>>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Some(Mutex::new(replayer)) }
    }

    /// Creates a replaying clock with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let output = next_output(self.replayer.as_ref(), "clock", "now");
        serde_json::from_value(output).expect("clock::now: failed to deserialize DateTime<Utc>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        CassetteReplayer::new(&cassette)
    }

    fn now_at(seq: u64, ts: &str) -> Interaction {
        Interaction {
            seq,
            port: "clock".into(),
            method: "now".into(),
            input: json!(null),
            output: json!(ts),
        }
    }

    #[test]
    fn replaying_clock_serves_recorded_time() {
        let clock = ReplayingClock::new(make_replayer(vec![now_at(0, "2024-06-15T10:30:00Z")]));
        assert_eq!(clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
    }

    #[test]
    fn replaying_clock_serves_times_in_order() {
        let clock = ReplayingClock::new(make_replayer(vec![
            now_at(0, "2024-01-01T00:00:00Z"),
            now_at(1, "2024-01-01T00:01:00Z"),
        ]));
        let t1 = clock.now();
        let t2 = clock.now();
        assert!(t2 > t1);
    }

    #[test]
    #[should_panic(expected = "clock port not configured")]
    fn unconfigured_clock_panics() {
        let _ = ReplayingClock::unconfigured().now();
    }
}

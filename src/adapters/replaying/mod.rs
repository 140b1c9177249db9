//! Replaying adapters that replay recorded interactions.

pub mod clock;
pub mod contents;

pub use clock::ReplayingClock;
pub use contents::ReplayingRepoContents;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ContentError;

/// Pull the output of the next recorded `port::method` interaction.
///
/// # Panics
///
/// Panics if no replayer is configured for the port or the cassette is exhausted.
pub(crate) fn next_output(
    replayer: Option<&Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let replayer = replayer.unwrap_or_else(|| {
        panic!("{port} port not configured in CassetteConfig; no cassette loaded for {port}")
    });
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output.clone()
}

/// Decode an `{"Ok": v}` / `{"Err": e}` output back into a typed result.
///
/// Mirror of `recording::record_result`.
///
/// # Panics
///
/// Panics if the recorded output does not follow the Ok/Err convention.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, ContentError> {
    if let Some(ok) = output.get("Ok") {
        return Ok(serde_json::from_value(ok.clone())
            .unwrap_or_else(|e| panic!("recorded Ok value has unexpected shape: {e}")));
    }
    if let Some(err) = output.get("Err") {
        return Err(serde_json::from_value(err.clone())
            .unwrap_or_else(|e| panic!("recorded Err value is not a ContentError: {e}")));
    }
    panic!("recorded output is neither Ok nor Err: {output}");
}

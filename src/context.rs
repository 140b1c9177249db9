//! Service context bundling the port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::adapters::live::{LiveClock, LiveRepoContents};
use crate::adapters::recording::{RecordingClock, RecordingRepoContents};
use crate::adapters::replaying::{ReplayingClock, ReplayingRepoContents};
use crate::cassette::config::CassetteConfig;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::ClientConfig;
use crate::ports::clock::Clock;
use crate::ports::contents::RepoContents;

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying); callers only ever see the traits.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Arc<dyn Clock>,
    /// Client for the remote content API.
    pub contents: Box<dyn RepoContents>,
    /// Optional cassette recorder; written to disk on finish or drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context talking to the API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from `config`.
    pub fn live(config: &ClientConfig) -> Result<Self, String> {
        let clock: Arc<dyn Clock> = Arc::new(LiveClock);
        let contents =
            LiveRepoContents::new(config, Arc::clone(&clock)).map_err(|e| e.to_string())?;
        Ok(Self { clock, contents: Box::new(contents), recorder: None })
    }

    /// Creates a recording context that writes a cassette to `path`.
    ///
    /// Uses live adapters for the actual work; every clock reading and
    /// content call is captured. The cassette is written by
    /// [`ServiceContext::finish`], or on drop as a fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from `config`.
    pub fn recording(config: &ClientConfig, path: &Path) -> Result<Self, String> {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            "repo-contents-session",
            env!("CARGO_PKG_VERSION"),
        )));
        let clock: Arc<dyn Clock> =
            Arc::new(RecordingClock::new(Arc::new(LiveClock), Arc::clone(&recorder)));
        let live = LiveRepoContents::new(config, Arc::clone(&clock)).map_err(|e| e.to_string())?;
        let contents = RecordingRepoContents::new(Box::new(live), Arc::clone(&recorder));

        Ok(Self { clock, contents: Box::new(contents), recorder: Some(recorder) })
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer over the same cassette so that
    /// per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Self::replaying_from(&CassetteConfig::monolithic(path))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette file panic with a clear message
    /// when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: Arc::new(
                replayers.clock.map_or_else(ReplayingClock::unconfigured, ReplayingClock::new),
            ),
            contents: Box::new(
                replayers
                    .contents
                    .map_or_else(ReplayingRepoContents::unconfigured, ReplayingRepoContents::new),
            ),
            recorder: None,
        })
    }

    /// Writes the session cassette, if this context is recording.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(mut self) -> Result<Option<PathBuf>, String> {
        self.save_recording()
    }

    fn save_recording(&mut self) -> Result<Option<PathBuf>, String> {
        let Some(recorder) = self.recorder.take() else {
            return Ok(None);
        };
        let guard = recorder.lock().map_err(|_| "cassette recorder lock poisoned".to_string())?;
        guard.save().map(Some).map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        if let Err(e) = self.save_recording() {
            warn!("{e}");
        }
    }
}

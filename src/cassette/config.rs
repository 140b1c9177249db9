//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a cassette path panic if
/// called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the clock port cassette file.
    pub clock: Option<PathBuf>,
    /// Path to the content API port cassette file.
    pub contents: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for the content API port.
    pub contents: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Returns a config where all port paths are `None`. Any port called
    /// during replay will panic because no cassette is loaded.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Config that serves every port from the same cassette file.
    #[must_use]
    pub fn monolithic(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self { clock: Some(path.clone()), contents: Some(path) }
    }

    /// Load a single cassette file and create a replayer over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_port_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        Cassette::load(path).map(|cassette| CassetteReplayer::new(&cassette))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            clock: self.clock.as_deref().map(Self::load_port_cassette).transpose()?,
            contents: self.contents.as_deref().map(Self::load_port_cassette).transpose()?,
        })
    }
}

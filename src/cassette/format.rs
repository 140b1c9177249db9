//! Cassette data structures and their YAML persistence.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`"contents"` or `"clock"`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port. Never contains credentials.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Version of the client that recorded it.
    pub commit: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Read and parse a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid cassette.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }

    /// Serialize the cassette to `path` as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let yaml = serde_yaml::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_then_load_preserves_interactions() {
        let dir = std::env::temp_dir().join("repo_contents_format_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.cassette.yaml");

        let cassette = Cassette {
            name: "session".into(),
            recorded_at: Utc::now(),
            commit: "0.1.0".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "contents".into(),
                method: "read".into(),
                input: json!({"repo": {"repo": "user/repo", "ref": "master"}, "path": "a.ly"}),
                output: json!({"Ok": {"content": "abc", "sha": "111"}}),
            }],
        };
        cassette.save(&path).unwrap();

        assert_eq!(Cassette::load(&path).unwrap(), cassette);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Cassette::load(Path::new("/nonexistent/none.cassette.yaml")).unwrap_err();
        assert!(err.contains("Failed to read cassette file"));
    }
}

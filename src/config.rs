//! Client configuration.

use std::env;

/// Public API endpoint used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Identifier written into commit messages when none is configured.
pub const DEFAULT_IDENTIFIER: &str = "repo-contents";

/// Environment variable overriding [`ClientConfig::api_url`].
pub const API_URL_VAR: &str = "REPO_CONTENTS_API_URL";

/// Environment variable naming the deployment that produced a change.
pub const HOMEPAGE_VAR: &str = "REPO_CONTENTS_HOMEPAGE";

/// Settings for a content client, fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Deployment identifier embedded in commit messages.
    pub identifier: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_string(), identifier: DEFAULT_IDENTIFIER.to_string() }
    }
}

impl ClientConfig {
    /// Builds a config from process environment, falling back to defaults.
    ///
    /// Callers that want `.env` support should run `dotenvy::dotenv()` first.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = non_empty_var(API_URL_VAR) {
            config = config.with_api_url(url);
        }
        if let Some(identifier) = non_empty_var(HOMEPAGE_VAR) {
            config.identifier = identifier;
        }
        config
    }

    /// Replaces the API base URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replaces the deployment identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Commit message attached to every write and delete.
    #[must_use]
    pub fn commit_message(&self) -> String {
        format!("Saved via {}", self.identifier)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

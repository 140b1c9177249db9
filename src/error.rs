//! Error taxonomy shared by every content operation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single content operation.
///
/// The enum is serializable so recorded cassettes can carry typed errors
/// and replay them unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentError {
    /// The requested file (or listing) does not exist at the given ref.
    #[error("file not found")]
    FileNotFound,

    /// The supplied sha does not match the remote's current version.
    #[error("conflict: the file was changed remotely")]
    Conflict,

    /// Any other non-success status, carrying the status text.
    #[error("request failed: {0}")]
    Generic(String),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The file path has an empty, `.` or `..` segment.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The client was configured with an unusable API URL.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ContentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Result alias for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generic_error_displays_status_text() {
        let err = ContentError::Generic("Unprocessable Entity".into());
        assert_eq!(err.to_string(), "request failed: Unprocessable Entity");
    }

    #[test]
    fn invalid_path_names_the_path() {
        let err = ContentError::InvalidPath("dir/../a.ly".into());
        assert_eq!(err.to_string(), "invalid path: dir/../a.ly");
    }

    #[test]
    fn errors_serialize_as_tagged_values() {
        assert_eq!(serde_json::to_value(ContentError::Conflict).unwrap(), json!("Conflict"));
        assert_eq!(
            serde_json::to_value(ContentError::Generic("Bad Gateway".into())).unwrap(),
            json!({"Generic": "Bad Gateway"})
        );
    }
}

//! Repository content port: list, read, write and delete files on a branch.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Branch used when the caller does not name one.
pub const DEFAULT_REF: &str = "master";

/// Boxed future type alias used by [`RepoContents`] to keep the trait dyn-compatible.
pub type ContentsFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ContentError>> + Send + 'a>>;

/// Opaque access token sent with every request.
///
/// The token is never stored by the client and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// A repository (`owner/name`) and the ref every call is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    /// Repository identifier, e.g. `"user/repo"`.
    pub repo: String,
    /// Branch or revision name.
    #[serde(rename = "ref")]
    pub reference: String,
}

impl RepoRef {
    /// Addresses `repo` on the default branch.
    pub fn new(repo: impl Into<String>) -> Self {
        Self { repo: repo.into(), reference: DEFAULT_REF.to_string() }
    }

    /// Addresses `repo` on an explicit branch or revision.
    #[must_use]
    pub fn at(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the repository root.
    pub path: String,
    /// Version token of the entry.
    pub sha: String,
}

/// Decoded text of a file together with its version token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    /// File body as plain text.
    pub content: String,
    /// Version token to pass back on write or delete.
    pub sha: String,
}

/// Create-or-update request for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutFile {
    /// Target path.
    pub path: String,
    /// New body, already base64-encoded.
    pub content: String,
    /// Current version token when updating; `None` to create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl PutFile {
    /// Request creating a new file.
    pub fn create(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self { path: path.into(), content: content.into(), sha: None }
    }

    /// Request replacing the file currently at version `sha`.
    pub fn update(
        path: impl Into<String>,
        content: impl Into<String>,
        sha: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), content: content.into(), sha: Some(sha.into()) }
    }
}

/// Delete request for a single file. The version token is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFile {
    /// Target path.
    pub path: String,
    /// Current version token of the file.
    pub sha: String,
}

impl DeleteFile {
    /// Request deleting `path` at version `sha`.
    pub fn new(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self { path: path.into(), sha: sha.into() }
    }
}

/// Reads and writes files in a hosted repository.
///
/// Every call is a single independent request; implementations hold no
/// per-file state. Optimistic concurrency is enforced remotely through the
/// `sha` tokens the caller carries between calls.
pub trait RepoContents: Send + Sync {
    /// Lists the entries at the repository root.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::FileNotFound`] if the repository or ref is
    /// absent, or another [`ContentError`] on failure.
    fn list<'a>(&'a self, token: &'a Token, repo: &'a RepoRef)
        -> ContentsFuture<'a, Vec<FileEntry>>;

    /// Reads one file and decodes its body to text.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::FileNotFound`] if `path` does not exist at the ref.
    fn read<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
        path: &'a str,
    ) -> ContentsFuture<'a, FileContent>;

    /// Creates or updates one file.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Conflict`] when the sha is stale or the file
    /// already exists, [`ContentError::Generic`] on any other rejection.
    fn write<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
        request: &'a PutFile,
    ) -> ContentsFuture<'a, ()>;

    /// Deletes one file.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Conflict`] when the sha is stale,
    /// [`ContentError::Generic`] on any other rejection.
    fn rm<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
        request: &'a DeleteFile,
    ) -> ContentsFuture<'a, ()>;
}

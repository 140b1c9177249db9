//! `repo-contents cat` command.

use std::io::Write;

use super::{describe, write_out};
use crate::ports::contents::{RepoContents, RepoRef, Token};

/// Print the decoded contents of one file.
///
/// # Errors
///
/// Returns an error string if the read fails or output cannot be written.
pub async fn run(
    contents: &dyn RepoContents,
    token: &Token,
    repo: &RepoRef,
    path: &str,
    out: &mut dyn Write,
) -> Result<(), String> {
    let file = contents.read(token, repo, path).await.map_err(|e| describe(&e, repo, path))?;
    tracing::debug!(path, sha = %file.sha, "printing file");
    write_out(out, &file.content)
}

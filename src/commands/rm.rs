//! `repo-contents rm` command.

use std::io::Write;

use super::{describe, write_out};
use crate::ports::contents::{DeleteFile, RepoContents, RepoRef, Token};

/// Delete `path`, which must currently be at version `sha`.
///
/// # Errors
///
/// Returns an error string if the delete is rejected or output cannot be written.
pub async fn run(
    contents: &dyn RepoContents,
    token: &Token,
    repo: &RepoRef,
    path: &str,
    sha: &str,
    out: &mut dyn Write,
) -> Result<(), String> {
    contents
        .rm(token, repo, &DeleteFile::new(path, sha))
        .await
        .map_err(|e| describe(&e, repo, path))?;
    write_out(out, &format!("removed {path}\n"))
}

//! `repo-contents ls` command.

use std::io::Write;

use super::write_out;
use crate::ports::contents::{RepoContents, RepoRef, Token};

/// List the repository root, one `sha  path` line per entry.
///
/// # Errors
///
/// Returns an error string if the listing fails or output cannot be written.
pub async fn run(
    contents: &dyn RepoContents,
    token: &Token,
    repo: &RepoRef,
    out: &mut dyn Write,
) -> Result<(), String> {
    let entries = contents
        .list(token, repo)
        .await
        .map_err(|e| format!("{}@{}: {e}", repo.repo, repo.reference))?;

    let listing: String =
        entries.iter().map(|entry| format!("{}  {}\n", entry.sha, entry.path)).collect();
    write_out(out, &listing)
}

//! `repo-contents put` command.

use std::io::{Read, Write};
use std::path::Path;

use base64::Engine as _;

use super::{describe, write_out};
use crate::ports::contents::{PutFile, RepoContents, RepoRef, Token};

/// Read the bytes to upload from `file`, or stdin when it is `None`.
///
/// # Errors
///
/// Returns an error string if the source cannot be read.
pub fn read_source(file: Option<&Path>) -> Result<Vec<u8>, String> {
    match file {
        Some(path) => std::fs::read(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

/// Upload `body` to `path`, creating it when `sha` is `None`.
///
/// # Errors
///
/// Returns an error string if the write is rejected or output cannot be written.
pub async fn run(
    contents: &dyn RepoContents,
    token: &Token,
    repo: &RepoRef,
    path: &str,
    body: &[u8],
    sha: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), String> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(body);
    let request = match sha {
        Some(sha) => PutFile::update(path, encoded, sha),
        None => PutFile::create(path, encoded),
    };

    contents.write(token, repo, &request).await.map_err(|e| describe(&e, repo, path))?;
    let verb = if request.sha.is_some() { "updated" } else { "created" };
    write_out(out, &format!("{verb} {path}\n"))
}

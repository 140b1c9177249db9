//! Command dispatch and handlers.

pub mod cat;
pub mod ls;
pub mod put;
pub mod rm;

use std::env;
use std::io::{self, Write};
use std::path::Path;

use crate::cli::{Cli, Command};
use crate::config::ClientConfig;
use crate::context::ServiceContext;
use crate::error::ContentError;
use crate::ports::contents::{RepoContents, RepoRef, Token};

/// Environment variable holding the access token when `--token` is absent.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// When set to a file path, the session is recorded to that cassette.
pub const RECORD_VAR: &str = "REPO_CONTENTS_RECORD";

/// When set to a file path, the session is served from that cassette.
pub const REPLAY_VAR: &str = "REPO_CONTENTS_REPLAY";

/// Dispatch a parsed command to its handler.
///
/// `REPO_CONTENTS_REPLAY` takes precedence over `REPO_CONTENTS_RECORD`;
/// without either, commands talk to the live API.
///
/// # Errors
///
/// Returns an error string if no token is available, the context cannot be
/// built, or the selected command handler fails.
pub async fn dispatch(cli: &Cli) -> Result<(), String> {
    let token = resolve_token(cli.token.as_deref())?;

    let ctx = if let Ok(path) = env::var(REPLAY_VAR) {
        ServiceContext::replaying(Path::new(&path))?
    } else if let Ok(path) = env::var(RECORD_VAR) {
        ServiceContext::recording(&ClientConfig::from_env(), Path::new(&path))?
    } else {
        ServiceContext::live(&ClientConfig::from_env())?
    };

    let mut stdout = io::stdout();
    let result = dispatch_with_contents(&cli.command, &*ctx.contents, &token, &mut stdout).await;

    // Write the cassette even when the command failed
    if let Some(path) = ctx.finish()? {
        eprintln!("Recording saved to: {}", path.display());
    }

    result
}

/// Dispatch a command against the given content client.
async fn dispatch_with_contents(
    command: &Command,
    contents: &dyn RepoContents,
    token: &Token,
    out: &mut dyn Write,
) -> Result<(), String> {
    match command {
        Command::Ls { repo } => ls::run(contents, token, &repo.to_repo_ref(), out).await,
        Command::Cat { repo, path } => cat::run(contents, token, &repo.to_repo_ref(), path, out).await,
        Command::Put { repo, path, file, sha } => {
            let body = put::read_source(file.as_deref())?;
            put::run(contents, token, &repo.to_repo_ref(), path, &body, sha.as_deref(), out).await
        }
        Command::Rm { repo, path, sha } => {
            rm::run(contents, token, &repo.to_repo_ref(), path, sha, out).await
        }
    }
}

fn resolve_token(flag: Option<&str>) -> Result<Token, String> {
    flag.map(str::to_string)
        .or_else(|| env::var(TOKEN_VAR).ok())
        .filter(|t| !t.trim().is_empty())
        .map(Token::new)
        .ok_or_else(|| format!("no access token: pass --token or set {TOKEN_VAR}"))
}

/// Describe a failed operation on `path` for the terminal.
pub(crate) fn describe(err: &ContentError, repo: &RepoRef, path: &str) -> String {
    let location = format!("{path} on {}@{}", repo.repo, repo.reference);
    match err {
        ContentError::FileNotFound => format!("{location}: not found"),
        ContentError::Conflict => {
            format!("{location}: changed remotely; read it again to get the current sha")
        }
        other => format!("{location}: {other}"),
    }
}

pub(crate) fn write_out(out: &mut dyn Write, text: &str) -> Result<(), String> {
    out.write_all(text.as_bytes()).map_err(|e| format!("Failed to write output: {e}"))
}

//! Thin client for a hosted repository content API.
//!
//! [`ports::RepoContents`] lists, reads, writes and deletes files on one
//! branch of a repository; [`adapters::live::LiveRepoContents`] implements
//! it over HTTPS. Every call is a single request mapped onto
//! [`error::ContentError`]. The `repo-contents` binary wraps the client in
//! a small CLI.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;

pub use config::ClientConfig;
pub use error::{ContentError, ContentResult};
pub use ports::{DeleteFile, FileContent, FileEntry, PutFile, RepoContents, RepoRef, Token};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// Help and version requests are printed and count as success.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli).await
}

#[cfg(test)]
mod tests {
    use super::run;

    #[tokio::test]
    async fn run_prints_help() {
        let result = run(["repo-contents", "--help"]).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn run_errors_on_unknown_subcommand() {
        let result = run(["repo-contents", "unknown"]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_errors_without_token() {
        let result = run(["repo-contents", "ls", "--repo", "user/repo", "--token", ""]).await;
        assert!(result.is_err_and(|e| e.contains("no access token")));
    }
}

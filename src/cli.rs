//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::ports::contents::{RepoRef, DEFAULT_REF};

/// Top-level CLI parser for `repo-contents`.
#[derive(Debug, Parser)]
#[command(name = "repo-contents", version, about = "Read and write files in a hosted repository")]
pub struct Cli {
    /// Access token. Falls back to the `GITHUB_TOKEN` environment variable.
    #[arg(long, global = true)]
    pub token: Option<String>,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Repository addressing shared by every subcommand.
#[derive(Debug, Args)]
pub struct RepoArgs {
    /// Repository as `owner/name`.
    #[arg(long)]
    pub repo: String,
    /// Branch or revision to operate on.
    #[arg(long = "ref", default_value = DEFAULT_REF)]
    pub reference: String,
}

impl RepoArgs {
    /// The addressing context passed to the client.
    #[must_use]
    pub fn to_repo_ref(&self) -> RepoRef {
        RepoRef::new(&self.repo).at(&self.reference)
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the files at the repository root.
    Ls {
        #[command(flatten)]
        repo: RepoArgs,
    },
    /// Print a file's contents.
    Cat {
        #[command(flatten)]
        repo: RepoArgs,
        /// Path of the file in the repository.
        path: String,
    },
    /// Create or update a file from a local file or stdin.
    Put {
        #[command(flatten)]
        repo: RepoArgs,
        /// Path of the file in the repository.
        path: String,
        /// Local file to upload; stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Current version token, required when replacing an existing file.
        #[arg(long)]
        sha: Option<String>,
    },
    /// Delete a file.
    Rm {
        #[command(flatten)]
        repo: RepoArgs,
        /// Path of the file in the repository.
        path: String,
        /// Current version token of the file.
        #[arg(long)]
        sha: String,
    },
}

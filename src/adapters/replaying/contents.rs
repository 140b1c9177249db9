//! Replaying adapter for the `RepoContents` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{
    ContentsFuture, DeleteFile, FileContent, FileEntry, PutFile, RepoContents, RepoRef, Token,
};

/// Serves recorded content responses from a cassette.
///
/// Inputs are not compared against the recording; calls are answered in
/// the order they were recorded for each method.
pub struct ReplayingRepoContents {
    replayer: Option<Mutex<CassetteReplayer>>,
}

impl ReplayingRepoContents {
    /// Create a replaying client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Some(Mutex::new(replayer)) }
    }

    /// Create a replaying client with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl RepoContents for ReplayingRepoContents {
    fn list<'a>(
        &'a self,
        _token: &'a Token,
        _repo: &'a RepoRef,
    ) -> ContentsFuture<'a, Vec<FileEntry>> {
        let output = next_output(self.replayer.as_ref(), "contents", "list");
        Box::pin(async move { replay_result(output) })
    }

    fn read<'a>(
        &'a self,
        _token: &'a Token,
        _repo: &'a RepoRef,
        _path: &'a str,
    ) -> ContentsFuture<'a, FileContent> {
        let output = next_output(self.replayer.as_ref(), "contents", "read");
        Box::pin(async move { replay_result(output) })
    }

    fn write<'a>(
        &'a self,
        _token: &'a Token,
        _repo: &'a RepoRef,
        _request: &'a PutFile,
    ) -> ContentsFuture<'a, ()> {
        let output = next_output(self.replayer.as_ref(), "contents", "write");
        Box::pin(async move { replay_result(output) })
    }

    fn rm<'a>(
        &'a self,
        _token: &'a Token,
        _repo: &'a RepoRef,
        _request: &'a DeleteFile,
    ) -> ContentsFuture<'a, ()> {
        let output = next_output(self.replayer.as_ref(), "contents", "rm");
        Box::pin(async move { replay_result(output) })
    }
}

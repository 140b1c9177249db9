//! Recording adapter for the `RepoContents` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{
    ContentsFuture, DeleteFile, FileContent, FileEntry, PutFile, RepoContents, RepoRef, Token,
};

/// Records content interactions while delegating to an inner implementation.
///
/// Tokens are never written to the cassette; only the repository, ref and
/// request payload are.
pub struct RecordingRepoContents {
    inner: Box<dyn RepoContents>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRepoContents {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(inner: Box<dyn RepoContents>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl RepoContents for RecordingRepoContents {
    fn list<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
    ) -> ContentsFuture<'a, Vec<FileEntry>> {
        Box::pin(async move {
            let result = self.inner.list(token, repo).await;
            record_result(&self.recorder, "contents", "list", &json!({ "repo": repo }), &result);
            result
        })
    }

    fn read<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
        path: &'a str,
    ) -> ContentsFuture<'a, FileContent> {
        Box::pin(async move {
            let result = self.inner.read(token, repo, path).await;
            let input = json!({ "repo": repo, "path": path });
            record_result(&self.recorder, "contents", "read", &input, &result);
            result
        })
    }

    fn write<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
        request: &'a PutFile,
    ) -> ContentsFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.write(token, repo, request).await;
            let input = json!({ "repo": repo, "request": request });
            record_result(&self.recorder, "contents", "write", &input, &result);
            result
        })
    }

    fn rm<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
        request: &'a DeleteFile,
    ) -> ContentsFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.rm(token, repo, request).await;
            let input = json!({ "repo": repo, "request": request });
            record_result(&self.recorder, "contents", "rm", &input, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::error::ContentError;

    /// Answers every call from fixed values.
    struct CannedContents;

    impl RepoContents for CannedContents {
        fn list<'a>(&'a self, _: &'a Token, _: &'a RepoRef) -> ContentsFuture<'a, Vec<FileEntry>> {
            Box::pin(async { Ok(vec![FileEntry { path: "a.ly".into(), sha: "111".into() }]) })
        }

        fn read<'a>(&'a self, _: &'a Token, _: &'a RepoRef, _: &'a str) -> ContentsFuture<'a, FileContent> {
            Box::pin(async { Err(ContentError::FileNotFound) })
        }

        fn write<'a>(&'a self, _: &'a Token, _: &'a RepoRef, _: &'a PutFile) -> ContentsFuture<'a, ()> {
            Box::pin(async { Err(ContentError::Conflict) })
        }

        fn rm<'a>(&'a self, _: &'a Token, _: &'a RepoRef, _: &'a DeleteFile) -> ContentsFuture<'a, ()> {
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn records_results_and_typed_errors_without_token() {
        let dir = std::env::temp_dir().join("repo_contents_rec_contents_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("contents.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test", "abc")));
        {
            let client = RecordingRepoContents::new(Box::new(CannedContents), Arc::clone(&recorder));
            let token = Token::new("super-secret");
            let repo = RepoRef::new("user/repo").at("main");

            assert!(client.list(&token, &repo).await.is_ok());
            assert_eq!(client.read(&token, &repo, "a.ly").await, Err(ContentError::FileNotFound));
            assert_eq!(
                client.write(&token, &repo, &PutFile::update("a.ly", "YWJj", "111")).await,
                Err(ContentError::Conflict)
            );
            assert_eq!(client.rm(&token, &repo, &DeleteFile::new("a.ly", "111")).await, Ok(()));
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("super-secret"));

        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        let methods: Vec<&str> = cassette.interactions.iter().map(|i| i.method.as_str()).collect();
        assert_eq!(methods, ["list", "read", "write", "rm"]);
        assert_eq!(
            cassette.interactions[0].output,
            json!({"Ok": [{"path": "a.ly", "sha": "111"}]})
        );
        assert_eq!(cassette.interactions[1].output, json!({"Err": "FileNotFound"}));
        assert_eq!(
            cassette.interactions[1].input,
            json!({"repo": {"repo": "user/repo", "ref": "main"}, "path": "a.ly"})
        );
        assert_eq!(cassette.interactions[3].output, json!({"Ok": null}));

        let _ = std::fs::remove_dir_all(&dir);
    }
}

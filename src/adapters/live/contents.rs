//! Live adapter for the `RepoContents` port using the hosted REST content API.

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CACHE_CONTROL};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ContentError, ContentResult};
use crate::ports::clock::Clock;
use crate::ports::contents::{
    ContentsFuture, DeleteFile, FileContent, FileEntry, PutFile, RepoContents, RepoRef, Token,
};

const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("repo-contents/", env!("CARGO_PKG_VERSION"));

/// Content client that talks to the remote API over HTTPS.
pub struct LiveRepoContents {
    client: Client,
    base: Url,
    commit_message: String,
    clock: Arc<dyn Clock>,
}

impl LiveRepoContents {
    /// Creates a client for the API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] if the API URL cannot be parsed, or
    /// [`ContentError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, clock: Arc<dyn Clock>) -> ContentResult<Self> {
        let base = Url::parse(&config.api_url)
            .map_err(|e| ContentError::Config(format!("invalid API URL {}: {e}", config.api_url)))?;
        if base.cannot_be_a_base() {
            return Err(ContentError::Config(format!("API URL {} cannot be a base", config.api_url)));
        }
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, base, commit_message: config.commit_message(), clock })
    }

    /// `{base}/repos/{owner}/{name}/contents[/{path}]`, each segment escaped.
    fn contents_url(&self, repo: &RepoRef, path: Option<&str>) -> ContentResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ContentError::Config(format!("API URL {} cannot be a base", self.base)))?;
            segments.pop_if_empty().push("repos");
            segments.extend(repo.repo.split('/').filter(|s| !s.is_empty()));
            segments.push("contents");
            if let Some(path) = path {
                segments.extend(file_segments(path)?);
            }
        }
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder, token: &Token) -> RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("token {}", token.expose()))
            .header(ACCEPT, ACCEPT_JSON)
            .header(CACHE_CONTROL, "no-cache")
    }

    /// GET with the ref and a fresh `cache_bust` value in the query string.
    async fn get(&self, token: &Token, repo: &RepoRef, url: Url) -> ContentResult<Response> {
        let cache_bust = self.clock.now().timestamp_millis().to_string();
        let request = self
            .authorized(self.client.get(url), token)
            .query(&[("ref", repo.reference.as_str()), ("cache_bust", cache_bust.as_str())]);
        Ok(request.send().await?)
    }
}

/// Splits a repository file path into URL segments.
///
/// The URL builder collapses `.` and `..` and an empty segment would change
/// the target, so those are rejected rather than sent.
fn file_segments(path: &str) -> ContentResult<Vec<&str>> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| matches!(*s, "" | "." | "..")) {
        return Err(ContentError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

/// File body as returned by the contents endpoint.
#[derive(Deserialize)]
struct ContentsFile {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
    sha: String,
}

impl ContentsFile {
    /// Decoded text of the file.
    ///
    /// Large files come back with an empty body and an encoding other than
    /// base64; those are an error, never an empty file.
    fn text(&self) -> ContentResult<String> {
        match self.encoding.as_deref() {
            Some("base64") => decode_body(&self.content),
            other => Err(ContentError::Decode(format!(
                "unsupported content encoding {}",
                other.unwrap_or("(missing)")
            ))),
        }
    }
}

/// Request body for creating or updating a file.
#[derive(Serialize)]
struct PutBody<'a> {
    branch: &'a str,
    content: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

/// Request body for deleting a file.
#[derive(Serialize)]
struct DeleteBody<'a> {
    branch: &'a str,
    message: &'a str,
    sha: &'a str,
}

/// Reason phrase for `status`, or its numeric code when there is none.
fn status_text(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(|| status.as_u16().to_string(), str::to_string)
}

/// Decodes a base64 body that may be wrapped across several lines.
fn decode_body(encoded: &str) -> ContentResult<String> {
    use base64::Engine as _;

    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| ContentError::Decode(format!("file content is not valid base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| ContentError::Decode(format!("file content is not UTF-8 text: {e}")))
}

impl RepoContents for LiveRepoContents {
    fn list<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
    ) -> ContentsFuture<'a, Vec<FileEntry>> {
        Box::pin(async move {
            let url = self.contents_url(repo, None)?;
            let response = self.get(token, repo, url).await?;
            let status = response.status();
            debug!(repo = %repo.repo, reference = %repo.reference, %status, "listed contents");

            match status {
                StatusCode::NOT_FOUND => Err(ContentError::FileNotFound),
                s if s.is_success() => Ok(response.json::<Vec<FileEntry>>().await?),
                s => Err(ContentError::Generic(status_text(s))),
            }
        })
    }

    fn read<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
        path: &'a str,
    ) -> ContentsFuture<'a, FileContent> {
        Box::pin(async move {
            let url = self.contents_url(repo, Some(path))?;
            let response = self.get(token, repo, url).await?;
            let status = response.status();
            debug!(repo = %repo.repo, reference = %repo.reference, path, %status, "read file");

            match status {
                StatusCode::NOT_FOUND => Err(ContentError::FileNotFound),
                s if s.is_success() => {
                    let file = response.json::<ContentsFile>().await?;
                    Ok(FileContent { content: file.text()?, sha: file.sha })
                }
                s => Err(ContentError::Generic(status_text(s))),
            }
        })
    }

    fn write<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
        request: &'a PutFile,
    ) -> ContentsFuture<'a, ()> {
        Box::pin(async move {
            let url = self.contents_url(repo, Some(&request.path))?;
            let body = PutBody {
                branch: &repo.reference,
                content: &request.content,
                message: &self.commit_message,
                sha: request.sha.as_deref(),
            };
            let response =
                self.authorized(self.client.put(url), token).json(&body).send().await?;
            let status = response.status();
            debug!(
                repo = %repo.repo,
                reference = %repo.reference,
                path = %request.path,
                update = request.sha.is_some(),
                %status,
                "wrote file"
            );

            match status {
                StatusCode::OK | StatusCode::CREATED => Ok(()),
                StatusCode::CONFLICT => Err(ContentError::Conflict),
                s => Err(ContentError::Generic(status_text(s))),
            }
        })
    }

    fn rm<'a>(
        &'a self,
        token: &'a Token,
        repo: &'a RepoRef,
        request: &'a DeleteFile,
    ) -> ContentsFuture<'a, ()> {
        Box::pin(async move {
            let url = self.contents_url(repo, Some(&request.path))?;
            let body = DeleteBody {
                branch: &repo.reference,
                message: &self.commit_message,
                sha: &request.sha,
            };
            let response =
                self.authorized(self.client.delete(url), token).json(&body).send().await?;
            let status = response.status();
            debug!(repo = %repo.repo, reference = %repo.reference, path = %request.path, %status, "deleted file");

            match status {
                StatusCode::OK => Ok(()),
                StatusCode::CONFLICT => Err(ContentError::Conflict),
                s => Err(ContentError::Generic(status_text(s))),
            }
        })
    }
}

//! Drive listing and download.
//!
//! Listing drains `nextPageToken` pagination per folder before returning and
//! filters to the fixed video extension set. Downloads stream to disk and
//! report progress at coarse percentage steps when the length is known.

use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use clipcast_core::Candidate;

use crate::auth::{ServiceAccount, TokenProvider};
use crate::error::{LibraryError, Result};

const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// File name suffixes accepted as publishable video.
pub const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".mov", ".m4v", ".webm"];

/// The library seam the orchestrator depends on.
#[async_trait]
pub trait VideoLibrary: Send + Sync {
    /// Every publishable candidate across the configured folders.
    async fn list_candidates(&self) -> Result<Vec<Candidate>>;

    /// Fetch one candidate's content into `dest`.
    async fn download(&self, id: &str, dest: &Path) -> Result<()>;
}

/// Google Drive implementation of [`VideoLibrary`].
pub struct DriveLibrary {
    client: reqwest::Client,
    tokens: TokenProvider,
    folder_ids: Vec<String>,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

impl DriveLibrary {
    pub fn new(account: ServiceAccount, folder_ids: Vec<String>) -> Self {
        let client = reqwest::Client::new();
        Self {
            tokens: TokenProvider::new(client.clone(), account),
            client,
            folder_ids,
        }
    }

    /// All files in one folder, pagination fully drained.
    async fn list_folder(&self, folder_id: &str) -> Result<Vec<Candidate>> {
        let token = self.tokens.bearer().await?;
        let query = format!("'{folder_id}' in parents and trashed=false");
        let mut page_token: Option<String> = None;
        let mut out = Vec::new();

        loop {
            let mut request = self
                .client
                .get(FILES_URL)
                .bearer_auth(&token)
                .query(&[
                    ("q", query.as_str()),
                    ("spaces", "drive"),
                    ("fields", "nextPageToken,files(id,name)"),
                ]);
            if let Some(ref t) = page_token {
                request = request.query(&[("pageToken", t.as_str())]);
            }

            let resp = request.send().await?;
            if !resp.status().is_success() {
                let status = resp.status().as_u16();
                let text = resp.text().await.unwrap_or_default();
                return Err(LibraryError::Api {
                    status,
                    message: format!("files.list failed for folder {folder_id}: {text}"),
                });
            }

            let page: FileList = resp
                .json()
                .await
                .map_err(|e| LibraryError::Parse(e.to_string()))?;
            out.extend(
                page.files
                    .into_iter()
                    .map(|f| Candidate { id: f.id, name: f.name }),
            );

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        debug!(folder_id, files = out.len(), "folder listed");
        Ok(out)
    }
}

#[async_trait]
impl VideoLibrary for DriveLibrary {
    async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        let mut all = Vec::new();
        for folder_id in &self.folder_ids {
            all.extend(self.list_folder(folder_id).await?);
        }
        let candidates: Vec<Candidate> =
            all.into_iter().filter(|c| is_video(&c.name)).collect();
        info!(candidates = candidates.len(), "library listing complete");
        Ok(candidates)
    }

    async fn download(&self, id: &str, dest: &Path) -> Result<()> {
        let token = self.tokens.bearer().await?;
        let url = format!("{FILES_URL}/{id}?alt=media");

        let resp = self.client.get(&url).bearer_auth(&token).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(LibraryError::Api {
                status,
                message: format!("download failed for {id}: {text}"),
            });
        }

        let total = resp.content_length();
        let mut stream = resp.bytes_stream();
        let mut file = tokio::fs::File::create(dest).await?;
        let mut written: u64 = 0;
        let mut next_report: u64 = 10;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;

            if let Some(total) = total.filter(|&t| t > 0) {
                let percent = written * 100 / total;
                if percent >= next_report {
                    info!(percent, "download progress");
                    next_report = (percent / 10 + 1) * 10;
                }
            }
        }
        file.flush().await?;

        info!(id, bytes = written, path = %dest.display(), "download complete");
        Ok(())
    }
}

/// Case-insensitive check against [`VIDEO_EXTENSIONS`].
fn is_video(name: &str) -> bool {
    let lower = name.to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

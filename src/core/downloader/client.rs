use std::path::{Path, PathBuf};

use futures_util::stream::{self, StreamExt};
use reqwest::Client;
use sha1::{Digest, Sha1};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::core::error::{InstallerError, InstallerResult};
use crate::core::install::{InstallEvent, ProgressSink};

/// A single file to download with optional SHA-1 for validation.
#[derive(Debug, Clone)]
pub struct DownloadEntry {
    pub url: String,
    pub dest: PathBuf,
    pub sha1: Option<String>,
}

/// Concurrent, SHA-1 validated downloader.
pub struct Downloader {
    client: Client,
    /// Maximum number of parallel downloads.
    concurrency: usize,
    progress: ProgressSink,
}

impl Downloader {
    pub fn new(client: Client, progress: ProgressSink) -> Self {
        Self {
            client,
            concurrency: 8,
            progress,
        }
    }

    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    // ── Single file download ────────────────────────────

    /// Download a single file to `dest`, optionally validating SHA-1.
    ///
    /// Creates parent directories as needed. Nothing is written when the
    /// checksum doesn't match.
    pub async fn download_file(
        &self,
        url: &str,
        dest: &Path,
        sha1_expected: Option<&str>,
    ) -> InstallerResult<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| InstallerError::io(parent, e))?;
        }

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstallerError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total_bytes = response.content_length();
        let bytes = response.bytes().await?;

        if let Some(expected) = sha1_expected {
            let actual = sha1_hex(&bytes);
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(InstallerError::Sha1Mismatch {
                    path: dest.to_path_buf(),
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        // Scoped so the handle is closed before anything else touches the file
        {
            let mut file = tokio::fs::File::create(dest)
                .await
                .map_err(|e| InstallerError::io(dest, e))?;
            file.write_all(&bytes)
                .await
                .map_err(|e| InstallerError::io(dest, e))?;
            file.flush()
                .await
                .map_err(|e| InstallerError::io(dest, e))?;
        }

        let file_name = dest
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.progress.emit(InstallEvent::Download {
            file_name,
            bytes: bytes.len() as u64,
            total_bytes,
        });

        debug!("Downloaded: {} -> {:?}", url, dest);
        Ok(())
    }

    // ── Batch concurrent downloads ──────────────────────

    /// Download many files concurrently using `buffer_unordered`.
    ///
    /// Returns the list of files that failed (if any).
    pub async fn download_batch(
        &self,
        entries: Vec<DownloadEntry>,
    ) -> Vec<(DownloadEntry, InstallerError)> {
        info!(
            "Starting batch download: {} files, concurrency={}",
            entries.len(),
            self.concurrency
        );

        let results: Vec<_> = stream::iter(entries)
            .map(|entry| async move {
                let result = self
                    .download_file(&entry.url, &entry.dest, entry.sha1.as_deref())
                    .await;
                (entry, result)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        results
            .into_iter()
            .filter_map(|(entry, result)| match result {
                Ok(()) => None,
                Err(e) => Some((entry, e)),
            })
            .collect()
    }
}

fn sha1_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha1_of_empty_input() {
        assert_eq!(sha1_hex(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[tokio::test]
    async fn batch_reports_failures_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(Client::new(), ProgressSink::disabled());

        // Nothing listens on port 9 locally, so both requests fail fast.
        let entries = vec![
            DownloadEntry {
                url: "http://127.0.0.1:9/a.jar".into(),
                dest: dir.path().join("a.jar"),
                sha1: None,
            },
            DownloadEntry {
                url: "http://127.0.0.1:9/b.ini".into(),
                dest: dir.path().join("b.ini"),
                sha1: None,
            },
        ];

        let failures = downloader.download_batch(entries).await;
        assert_eq!(failures.len(), 2);
        assert!(!dir.path().join("a.jar").exists());
    }
}

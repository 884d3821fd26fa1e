// ─── Companion Updater ───
// Auxiliary java agent installed next to the loader; it runs its own update
// check every time the game starts.

use std::path::Path;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::downloader::{DownloadEntry, Downloader};
use crate::core::error::{InstallerError, InstallerResult};
use crate::core::install::ProgressSink;
use crate::core::settings::{CompanionFile, CompanionSettings};

#[async_trait]
pub trait CompanionInstaller: Send + Sync {
    /// Place the companion files into `base_dir`. Safe to call repeatedly.
    async fn install(&self, base_dir: &Path, progress: &ProgressSink) -> InstallerResult<()>;
}

/// Downloads the updater agent jar and its config from the configured URLs.
pub struct UpdaterInstaller {
    downloader: Downloader,
    settings: CompanionSettings,
}

impl UpdaterInstaller {
    pub fn new(downloader: Downloader, settings: CompanionSettings) -> Self {
        Self {
            downloader,
            settings,
        }
    }

    fn entries(&self, base_dir: &Path) -> Vec<DownloadEntry> {
        std::iter::once(&self.settings.agent)
            .chain(self.settings.extra_files.iter())
            .map(|file: &CompanionFile| DownloadEntry {
                url: file.url.clone(),
                dest: base_dir.join(&file.file_name),
                sha1: file.sha1.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl CompanionInstaller for UpdaterInstaller {
    async fn install(&self, base_dir: &Path, progress: &ProgressSink) -> InstallerResult<()> {
        progress.message("Downloading updater");

        let entries = self.entries(base_dir);
        let total = entries.len();
        let failures = self.downloader.download_batch(entries).await;

        let Some((_, first_error)) = failures.first() else {
            info!("Installed {} updater file(s) into {:?}", total, base_dir);
            return Ok(());
        };

        for (entry, err) in &failures {
            warn!("Updater download {} failed: {}", entry.url, err);
        }
        let names = failures
            .iter()
            .filter_map(|(entry, _)| entry.dest.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Err(InstallerError::Companion(format!(
            "could not download {} ({})",
            names, first_error
        )))
    }
}

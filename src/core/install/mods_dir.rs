use std::path::{Path, PathBuf};

use tracing::debug;

use super::outcome::InstallWarning;

pub const MODS_DIR_NAME: &str = "mods";

pub fn mods_dir(base_dir: &Path) -> PathBuf {
    base_dir.join(MODS_DIR_NAME)
}

/// Make sure `<base>/mods` exists. Never fails; problems come back as a warning.
pub async fn ensure_mods_dir(base_dir: &Path) -> Option<InstallWarning> {
    let dir = mods_dir(base_dir);

    if let Err(e) = tokio::fs::create_dir_all(&dir).await {
        return Some(InstallWarning::ModsDirectoryUnreadable {
            path: dir,
            reason: e.to_string(),
        });
    }

    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) => {
            return Some(InstallWarning::ModsDirectoryUnreadable {
                path: dir,
                reason: e.to_string(),
            })
        }
    };

    match entries.next_entry().await {
        Ok(None) => {
            debug!("Mods directory {:?} is ready", dir);
            None
        }
        Ok(Some(_)) => Some(InstallWarning::ModsDirectoryNotEmpty(dir)),
        Err(e) => Some(InstallWarning::ModsDirectoryUnreadable {
            path: dir,
            reason: e.to_string(),
        }),
    }
}

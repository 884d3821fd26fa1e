use std::path::PathBuf;
use thiserror::Error;

use crate::core::launcher::LauncherVariant;

/// Central error type for the installer.
/// Every module returns `Result<T, InstallerError>`.
#[derive(Debug, Error)]
pub enum InstallerError {
    // ── Pre-flight ──────────────────────────────────────
    #[error("Launcher directory not found at {0:?}")]
    DirectoryNotFound(PathBuf),

    // ── Launcher variant resolution ─────────────────────
    #[error("Could not find a valid launcher profile .json in {0:?}")]
    NoCompatibleLauncher(PathBuf),

    #[error(
        "Multiple launcher installations were found ({}), please specify the target launcher using --launcher",
        cli_names(.found)
    )]
    AmbiguousLauncher { found: Vec<LauncherVariant> },

    #[error("Launcher selection was cancelled")]
    SelectionCancelled,

    #[error("Unknown launcher type: {0}")]
    UnknownLauncherVariant(String),

    // ── Profile document ────────────────────────────────
    #[error("Could not find launcher profiles at {0:?}")]
    ProfileFileNotFound(PathBuf),

    #[error("Launcher profiles at {path:?} are not valid JSON: {source}")]
    ProfileParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Launcher profiles at {path:?} have an unexpected shape: {reason}")]
    InvalidProfileDocument { path: PathBuf, reason: String },

    #[error("Failed to write launcher profiles to {path:?}: {source}")]
    ProfileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── Integrity ───────────────────────────────────────
    #[error("SHA-1 mismatch for {path:?}: expected {expected}, got {actual}")]
    Sha1Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Loader ──────────────────────────────────────────
    #[error("Loader error: {0}")]
    Loader(String),

    #[error("Loader API unreachable: {0}")]
    LoaderApi(String),

    // ── Companion ───────────────────────────────────────
    #[error("Updater install failed: {0}")]
    Companion(String),

    // ── Settings ────────────────────────────────────────
    #[error("Invalid settings file {path:?}: {reason}")]
    Settings { path: PathBuf, reason: String },
}

/// Convenience alias used throughout the crate.
pub type InstallerResult<T> = Result<T, InstallerError>;

impl From<std::io::Error> for InstallerError {
    fn from(source: std::io::Error) -> Self {
        InstallerError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

fn cli_names(variants: &[LauncherVariant]) -> String {
    variants
        .iter()
        .map(|v| v.cli_name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl InstallerError {
    /// Shorthand for wrapping an IO error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallerError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_launcher_lists_cli_names() {
        let err = InstallerError::AmbiguousLauncher {
            found: vec![LauncherVariant::Standard, LauncherVariant::MicrosoftStore],
        };
        let message = err.to_string();
        assert!(message.contains("win32, microsoft_store"));
        assert!(message.contains("--launcher"));
    }
}

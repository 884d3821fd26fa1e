use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::error::InstallerError;
use crate::core::launcher::LauncherVariant;

/// Stage at which a failed install stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    Preflight,
    Variant,
    Loader,
    Profile,
}

impl fmt::Display for FailedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailedStage::Preflight => "pre-flight checks",
            FailedStage::Variant => "launcher selection",
            FailedStage::Loader => "loader installation",
            FailedStage::Profile => "launcher profile setup",
        };
        f.write_str(label)
    }
}

/// Problems that don't stop the install but are worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallWarning {
    #[error("Failed to install the updater ({0}). The rest of the install should be okay.")]
    CompanionInstall(String),

    #[error(
        "Mods directory {0:?} is not empty - you may have modded the game before and will need \
         to clear your mods to prevent issues."
    )]
    ModsDirectoryNotEmpty(PathBuf),

    #[error("Error checking the mods directory {path:?}: {reason}")]
    ModsDirectoryUnreadable { path: PathBuf, reason: String },

    #[error("The launcher appears to be running; close it before starting the game so it picks up the new profile.")]
    LauncherRunning,
}

/// Launcher profile the install pointed at the new loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredProfile {
    pub variant: LauncherVariant,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub loader_version_id: String,
    pub profile: Option<RegisteredProfile>,
    pub warnings: Vec<InstallWarning>,
}

#[derive(Debug)]
pub enum InstallOutcome {
    Success(InstallReport),
    Failed {
        stage: FailedStage,
        error: InstallerError,
        warnings: Vec<InstallWarning>,
    },
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Success(_))
    }

    pub fn warnings(&self) -> &[InstallWarning] {
        match self {
            InstallOutcome::Success(report) => &report.warnings,
            InstallOutcome::Failed { warnings, .. } => warnings,
        }
    }
}

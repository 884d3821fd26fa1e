use std::path::Path;

use crate::core::install::ProgressSink;

/// Everything a loader installer needs for one run.
pub struct InstallContext<'a> {
    pub game_version: &'a str,
    pub loader_version: &'a str,
    /// Launcher directory (`.minecraft`); version files go under `versions/`.
    pub base_dir: &'a Path,
    pub progress: &'a ProgressSink,
}

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::core::error::InstallerError;

/// Known flavors of the game launcher, each identified by the profiles file it keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LauncherVariant {
    /// Standalone launcher (`win32` on the command line).
    Standard,
    /// Launcher distributed through the Microsoft Store / Xbox app.
    MicrosoftStore,
}

impl LauncherVariant {
    /// Every variant, in discovery order.
    pub const ALL: [LauncherVariant; 2] = [LauncherVariant::Standard, LauncherVariant::MicrosoftStore];

    /// Name of the configuration file this variant keeps in the launcher directory.
    pub fn profiles_file_name(self) -> &'static str {
        match self {
            LauncherVariant::Standard => "launcher_profiles.json",
            LauncherVariant::MicrosoftStore => "launcher_profiles_microsoft_store.json",
        }
    }

    /// Name accepted by `--launcher`.
    pub fn cli_name(self) -> &'static str {
        match self {
            LauncherVariant::Standard => "win32",
            LauncherVariant::MicrosoftStore => "microsoft_store",
        }
    }

    /// Human readable label used by the interactive prompt.
    pub fn label(self) -> &'static str {
        match self {
            LauncherVariant::Standard => "Standalone launcher",
            LauncherVariant::MicrosoftStore => "Microsoft Store / Xbox app launcher",
        }
    }
}

impl fmt::Display for LauncherVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for LauncherVariant {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LauncherVariant::ALL
            .into_iter()
            .find(|variant| variant.cli_name() == wanted)
            .ok_or_else(|| InstallerError::UnknownLauncherVariant(s.to_string()))
    }
}

/// Report which launcher variants have a readable profiles file in `base_dir`.
///
/// A missing `base_dir` simply yields an empty list; callers validate the
/// directory itself before getting here.
pub fn discover(base_dir: &Path) -> Vec<LauncherVariant> {
    let found: Vec<LauncherVariant> = LauncherVariant::ALL
        .into_iter()
        .filter(|variant| is_readable_file(&base_dir.join(variant.profiles_file_name())))
        .collect();

    debug!("Discovered launcher variants in {:?}: {:?}", base_dir, found);
    found
}

fn is_readable_file(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => std::fs::File::open(path).is_ok(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn file_names_are_unique() {
        let names: HashSet<_> = LauncherVariant::ALL
            .iter()
            .map(|v| v.profiles_file_name())
            .collect();
        assert_eq!(names.len(), LauncherVariant::ALL.len());
    }

    #[test]
    fn discover_returns_only_present_variant() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("launcher_profiles_microsoft_store.json"), "{}").unwrap();

        assert_eq!(discover(dir.path()), vec![LauncherVariant::MicrosoftStore]);
    }

    #[test]
    fn discover_returns_both_variants() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("launcher_profiles.json"), "{}").unwrap();
        std::fs::write(dir.path().join("launcher_profiles_microsoft_store.json"), "{}").unwrap();

        assert_eq!(discover(dir.path()), LauncherVariant::ALL.to_vec());
    }

    #[test]
    fn discover_ignores_directories_named_like_profiles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("launcher_profiles.json")).unwrap();

        assert!(discover(dir.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn discover_skips_unreadable_profiles_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("launcher_profiles.json");
        std::fs::write(&locked, "{}").unwrap();
        std::fs::write(dir.path().join("launcher_profiles_microsoft_store.json"), "{}").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read regardless of mode bits.
        if std::fs::File::open(&locked).is_ok() {
            return;
        }
        assert_eq!(discover(dir.path()), vec![LauncherVariant::MicrosoftStore]);
    }

    #[test]
    fn discover_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("does-not-exist")).is_empty());
    }

    #[test]
    fn parse_cli_names() {
        assert_eq!(
            "WIN32".parse::<LauncherVariant>().unwrap(),
            LauncherVariant::Standard
        );
        assert_eq!(
            "microsoft_store".parse::<LauncherVariant>().unwrap(),
            LauncherVariant::MicrosoftStore
        );
        assert!("steam".parse::<LauncherVariant>().is_err());
    }
}

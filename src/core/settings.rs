use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::{InstallerError, InstallerResult};
use crate::core::launcher::ProfileTemplate;
use crate::core::loaders::LoaderKind;

const APP_DIR_NAME: &str = "modloader-installer";
const SETTINGS_FILE: &str = "installer_settings.json";

const DEFAULT_JAVA_ARGS: &str = "-Xmx4G -XX:+UnlockExperimentalVMOptions -XX:+UseG1GC \
-XX:G1NewSizePercent=20 -XX:G1ReservePercent=20 -XX:MaxGCPauseMillis=50 -XX:G1HeapRegionSize=32M";

/// A single file the companion installer drops into the launcher directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanionFile {
    pub url: String,
    pub file_name: String,
    #[serde(default)]
    pub sha1: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionSettings {
    pub enabled: bool,
    /// Java agent jar, referenced from the profile's `javaArgs`.
    pub agent: CompanionFile,
    /// Extra files shipped next to the agent (its config, mostly).
    pub extra_files: Vec<CompanionFile>,
}

impl Default for CompanionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            agent: CompanionFile {
                url: "https://git.sleeping.town/unascribed/unsup/releases/download/v1.1.4/unsup-1.1.4.jar"
                    .into(),
                file_name: "unsup.jar".into(),
                sha1: None,
            },
            extra_files: vec![CompanionFile {
                url: "https://spoosaroo.com/pack/unsup.ini".into(),
                file_name: "unsup.ini".into(),
                sha1: None,
            }],
        }
    }
}

/// Installer configuration. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerSettings {
    /// Overrides the loader's own profile name prefix.
    pub profile_prefix: Option<String>,
    pub profile_icon: String,
    pub java_args: String,
    pub fabric_meta_url: String,
    pub quilt_meta_url: String,
    pub download_concurrency: usize,
    pub companion: CompanionSettings,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            profile_prefix: None,
            profile_icon: "Furnace".into(),
            java_args: DEFAULT_JAVA_ARGS.into(),
            fabric_meta_url: "https://meta.fabricmc.net/v2".into(),
            quilt_meta_url: "https://meta.quiltmc.org/v3".into(),
            download_concurrency: 4,
            companion: CompanionSettings::default(),
        }
    }
}

impl InstallerSettings {
    /// Load settings from `explicit` if given, else from the per-user settings
    /// file if one exists, else defaults.
    ///
    /// Only an explicitly requested file is allowed to fail the run.
    pub fn load(explicit: Option<&Path>) -> InstallerResult<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        let Some(path) = default_settings_path() else {
            return Ok(Self::default());
        };
        if !path.is_file() {
            return Ok(Self::default());
        }

        match Self::read(&path) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("Ignoring unreadable settings: {}", e);
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> InstallerResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| InstallerError::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let settings: Self = serde_json::from_str(&raw).map_err(|e| InstallerError::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Prefix of the launcher profile name for `kind`.
    pub fn profile_prefix_for(&self, kind: LoaderKind) -> String {
        match &self.profile_prefix {
            Some(prefix) => prefix.clone(),
            None => kind.profile_prefix().to_string(),
        }
    }

    /// Fixed fields of a newly created launcher profile.
    pub fn profile_template(&self) -> ProfileTemplate {
        let java_args = if self.companion.enabled {
            format!(
                "{} -javaagent:{}",
                self.java_args.trim(),
                self.companion.agent.file_name
            )
        } else {
            self.java_args.trim().to_string()
        };

        ProfileTemplate {
            icon: self.profile_icon.clone(),
            java_args,
        }
    }
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "profile_prefix": "Spoosaroo 2025" }"#).unwrap();

        let settings = InstallerSettings::load(Some(&path)).unwrap();
        assert_eq!(settings.profile_prefix_for(LoaderKind::Quilt), "Spoosaroo 2025");
        assert_eq!(settings.fabric_meta_url, "https://meta.fabricmc.net/v2");
        assert!(settings.companion.enabled);
    }

    #[test]
    fn profile_prefix_follows_loader_kind() {
        let settings = InstallerSettings::default();
        assert_eq!(settings.profile_prefix_for(LoaderKind::Fabric), "Fabric Loader");
        assert_eq!(settings.profile_prefix_for(LoaderKind::Quilt), "Quilt Loader");
    }

    #[test]
    fn explicit_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "profile_prefix = 1").unwrap();

        let err = InstallerSettings::load(Some(&path)).unwrap_err();
        assert!(matches!(err, InstallerError::Settings { .. }));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(InstallerSettings::load(Some(&dir.path().join("nope.json"))).is_err());
    }

    #[test]
    fn java_args_reference_agent_jar() {
        let settings = InstallerSettings::default();
        let template = settings.profile_template();
        assert!(template.java_args.starts_with("-Xmx4G"));
        assert!(template.java_args.ends_with("-XX:G1HeapRegionSize=32M -javaagent:unsup.jar"));
    }

    #[test]
    fn java_args_skip_agent_when_companion_disabled() {
        let mut settings = InstallerSettings::default();
        settings.companion.enabled = false;
        assert!(!settings.profile_template().java_args.contains("javaagent"));
    }
}

// ─── Install Orchestrator ───
// Start → VariantResolved → LoaderInstalled → ProfileMerged → CompanionInstalled → Done
//
// Any stage up to the profile merge can fail the run; nothing already written
// is rolled back. Updater and mods directory problems only produce warnings.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use super::events::{InstallEvent, InstallStage, ProgressSink};
use super::mods_dir::ensure_mods_dir;
use super::outcome::{FailedStage, InstallOutcome, InstallReport, InstallWarning, RegisteredProfile};
use super::selector::{resolve_variant, VariantSelector};
use crate::core::companion::CompanionInstaller;
use crate::core::error::{InstallerError, InstallerResult};
use crate::core::launcher::{self, process, LauncherVariant, ProfileDocument, ProfileTemplate};
use crate::core::loaders::{InstallContext, LoaderInstaller};

/// Parameters of a single install run.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub base_dir: PathBuf,
    pub game_version: String,
    pub loader_version: String,
    /// Register a launcher profile (and install the updater) after the loader.
    pub create_profile: bool,
}

/// Where the profile ends up and what it looks like when created.
#[derive(Debug, Clone)]
pub struct ProfilePolicy {
    pub name_prefix: String,
    pub template: ProfileTemplate,
    /// Install the companion updater after the profile merge.
    pub install_companion: bool,
}

type StageResult<T> = Result<T, (FailedStage, InstallerError)>;

pub struct InstallOrchestrator<'a> {
    loader: &'a dyn LoaderInstaller,
    companion: &'a dyn CompanionInstaller,
    selector: &'a dyn VariantSelector,
    policy: ProfilePolicy,
    progress: ProgressSink,
    launcher_probe: fn() -> bool,
}

impl<'a> InstallOrchestrator<'a> {
    pub fn new(
        loader: &'a dyn LoaderInstaller,
        companion: &'a dyn CompanionInstaller,
        selector: &'a dyn VariantSelector,
        policy: ProfilePolicy,
        progress: ProgressSink,
    ) -> Self {
        Self {
            loader,
            companion,
            selector,
            policy,
            progress,
            launcher_probe: process::is_launcher_running,
        }
    }

    /// Replace the running-launcher check (tests, or platforms where it misfires).
    pub fn with_launcher_probe(mut self, probe: fn() -> bool) -> Self {
        self.launcher_probe = probe;
        self
    }

    /// Run the whole sequence once.
    pub async fn run(&self, request: &InstallRequest) -> InstallOutcome {
        let mut warnings = Vec::new();
        self.stage(InstallStage::Start);

        match self.execute(request, &mut warnings).await {
            Ok((loader_version_id, profile)) => {
                self.stage(InstallStage::Done);
                info!(
                    "Install finished: {} ({} warning(s))",
                    loader_version_id,
                    warnings.len()
                );
                InstallOutcome::Success(InstallReport {
                    loader_version_id,
                    profile,
                    warnings,
                })
            }
            Err((stage, error)) => {
                error!("Install failed during {}: {}", stage, error);
                InstallOutcome::Failed {
                    stage,
                    error,
                    warnings,
                }
            }
        }
    }

    async fn execute(
        &self,
        request: &InstallRequest,
        warnings: &mut Vec<InstallWarning>,
    ) -> StageResult<(String, Option<RegisteredProfile>)> {
        let base_dir = request.base_dir.as_path();

        // 1. Pre-flight
        match tokio::fs::metadata(base_dir).await {
            Ok(meta) if meta.is_dir() => {}
            _ => {
                return Err((
                    FailedStage::Preflight,
                    InstallerError::DirectoryNotFound(base_dir.to_path_buf()),
                ))
            }
        }
        if request.create_profile && self.launcher_running().await {
            self.warn(warnings, InstallWarning::LauncherRunning);
        }

        // 2. Launcher variant, before anything is written
        let variant = if request.create_profile {
            let variant = resolve_variant(base_dir, self.selector)
                .await
                .map_err(|e| (FailedStage::Variant, e))?;
            self.stage(InstallStage::VariantResolved);
            Some(variant)
        } else {
            None
        };

        // 3. Loader
        let installed = self
            .loader
            .install(InstallContext {
                game_version: &request.game_version,
                loader_version: &request.loader_version,
                base_dir,
                progress: &self.progress,
            })
            .await
            .map_err(|e| (FailedStage::Loader, e))?;
        self.stage(InstallStage::LoaderInstalled);

        // 4. Profile + companion
        let profile = match variant {
            Some(variant) => {
                let name = launcher::profile_name(&self.policy.name_prefix, &request.game_version);
                self.merge_profile(base_dir, variant, &name, &installed.version_id)
                    .await
                    .map_err(|e| (FailedStage::Profile, e))?;
                self.stage(InstallStage::ProfileMerged);

                if self.policy.install_companion {
                    self.install_companion(base_dir, warnings).await;
                }

                Some(RegisteredProfile { variant, name })
            }
            None => None,
        };

        // 5. Mods directory
        if let Some(warning) = ensure_mods_dir(base_dir).await {
            self.warn(warnings, warning);
        }

        Ok((installed.version_id, profile))
    }

    /// Load, merge and atomically save the variant's profiles file.
    async fn merge_profile(
        &self,
        base_dir: &Path,
        variant: LauncherVariant,
        name: &str,
        version_id: &str,
    ) -> InstallerResult<()> {
        let path = base_dir.join(variant.profiles_file_name());
        self.progress.message(format!("Creating profile '{}'", name));

        let mut document = ProfileDocument::load(&path).await?;
        let kind = launcher::merge(&mut document, name, version_id, &self.policy.template)?;
        document.save(&path).await?;

        info!("{:?} profile '{}' -> {} in {:?}", kind, name, version_id, path);
        Ok(())
    }

    async fn install_companion(&self, base_dir: &Path, warnings: &mut Vec<InstallWarning>) {
        match self.companion.install(base_dir, &self.progress).await {
            Ok(()) => self.stage(InstallStage::CompanionInstalled),
            Err(e) => self.warn(warnings, InstallWarning::CompanionInstall(e.to_string())),
        }
    }

    /// Runs the process scan off the async workers.
    async fn launcher_running(&self) -> bool {
        match tokio::task::spawn_blocking(self.launcher_probe).await {
            Ok(running) => running,
            Err(e) => {
                warn!("Launcher process check failed: {}", e);
                false
            }
        }
    }

    fn stage(&self, stage: InstallStage) {
        self.progress.emit(InstallEvent::Stage(stage));
    }

    fn warn(&self, warnings: &mut Vec<InstallWarning>, warning: InstallWarning) {
        warn!("{}", warning);
        self.progress.emit(InstallEvent::Warning(warning.clone()));
        warnings.push(warning);
    }
}

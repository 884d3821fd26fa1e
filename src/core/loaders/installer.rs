use async_trait::async_trait;

use crate::core::error::InstallerResult;
use crate::core::settings::InstallerSettings;

use super::{context::InstallContext, fabric::FabricInstaller, meta::LoaderMeta, quilt::QuiltInstaller};

/// What a finished loader install hands back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderInstallResult {
    /// Launcher version id to put in the profile's `lastVersionId`.
    pub version_id: String,
}

#[async_trait]
pub trait LoaderInstaller: Send + Sync {
    async fn install(&self, ctx: InstallContext<'_>) -> InstallerResult<LoaderInstallResult>;
}

/// Supported mod loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
    Fabric,
    Quilt,
}

impl LoaderKind {
    /// Default launcher profile name prefix, so each loader gets its own profile.
    pub fn profile_prefix(self) -> &'static str {
        match self {
            LoaderKind::Fabric => "Fabric Loader",
            LoaderKind::Quilt => "Quilt Loader",
        }
    }
}

/// Static dispatch over the concrete installers.
pub enum Installer {
    Fabric(FabricInstaller),
    Quilt(QuiltInstaller),
}

impl Installer {
    pub fn new(kind: LoaderKind, client: reqwest::Client, settings: &InstallerSettings) -> Self {
        match kind {
            LoaderKind::Fabric => {
                Self::Fabric(FabricInstaller::new(client, &settings.fabric_meta_url))
            }
            LoaderKind::Quilt => Self::Quilt(QuiltInstaller::new(client, &settings.quilt_meta_url)),
        }
    }

    /// Meta service used by this loader, for resolving default versions.
    pub fn meta(&self) -> &LoaderMeta {
        match self {
            Installer::Fabric(i) => i.meta(),
            Installer::Quilt(i) => i.meta(),
        }
    }
}

#[async_trait]
impl LoaderInstaller for Installer {
    async fn install(&self, ctx: InstallContext<'_>) -> InstallerResult<LoaderInstallResult> {
        match self {
            Installer::Fabric(i) => i.install(ctx).await,
            Installer::Quilt(i) => i.install(ctx).await,
        }
    }
}

use async_trait::async_trait;
use tracing::info;

use super::context::InstallContext;
use super::installer::{LoaderInstallResult, LoaderInstaller};
use super::meta::LoaderMeta;
use super::version_files::write_version_profile;
use crate::core::error::InstallerResult;

/// Installs Fabric by dropping its launcher profile into `versions/`.
///
/// Libraries are left for the launcher to fetch on first start.
pub struct FabricInstaller {
    meta: LoaderMeta,
}

impl FabricInstaller {
    pub fn new(client: reqwest::Client, meta_url: &str) -> Self {
        Self {
            meta: LoaderMeta::new(client, meta_url, "Fabric"),
        }
    }

    pub fn meta(&self) -> &LoaderMeta {
        &self.meta
    }

    fn version_id(game_version: &str, loader_version: &str) -> String {
        format!("fabric-loader-{}-{}", loader_version, game_version)
    }
}

#[async_trait]
impl LoaderInstaller for FabricInstaller {
    async fn install(&self, ctx: InstallContext<'_>) -> InstallerResult<LoaderInstallResult> {
        info!(
            "Installing Fabric {} for Minecraft {}",
            ctx.loader_version, ctx.game_version
        );
        ctx.progress.message(format!(
            "Installing Fabric Loader {} ({})",
            ctx.loader_version, ctx.game_version
        ));

        let profile = self
            .meta
            .profile_json(ctx.game_version, ctx.loader_version)
            .await?;

        let version_id = write_version_profile(
            ctx.base_dir,
            &profile,
            &Self::version_id(ctx.game_version, ctx.loader_version),
        )
        .await?;

        info!("Fabric installed successfully as {}", version_id);
        Ok(LoaderInstallResult { version_id })
    }
}

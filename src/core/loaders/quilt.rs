use async_trait::async_trait;
use tracing::info;

use super::context::InstallContext;
use super::installer::{LoaderInstallResult, LoaderInstaller};
use super::meta::LoaderMeta;
use super::version_files::write_version_profile;
use crate::core::error::InstallerResult;

/// Installs Quilt loader via the Quilt Meta API (nearly identical to Fabric's API).
pub struct QuiltInstaller {
    meta: LoaderMeta,
}

impl QuiltInstaller {
    pub fn new(client: reqwest::Client, meta_url: &str) -> Self {
        Self {
            meta: LoaderMeta::new(client, meta_url, "Quilt"),
        }
    }

    pub fn meta(&self) -> &LoaderMeta {
        &self.meta
    }
}

#[async_trait]
impl LoaderInstaller for QuiltInstaller {
    async fn install(&self, ctx: InstallContext<'_>) -> InstallerResult<LoaderInstallResult> {
        info!(
            "Installing Quilt loader {} for MC {}",
            ctx.loader_version, ctx.game_version
        );
        ctx.progress.message(format!(
            "Installing Quilt Loader {} ({})",
            ctx.loader_version, ctx.game_version
        ));

        let profile = self
            .meta
            .profile_json(ctx.game_version, ctx.loader_version)
            .await?;

        let fallback_id = format!("quilt-loader-{}-{}", ctx.loader_version, ctx.game_version);
        let version_id = write_version_profile(ctx.base_dir, &profile, &fallback_id).await?;

        info!("Quilt installed successfully as {}", version_id);
        Ok(LoaderInstallResult { version_id })
    }
}

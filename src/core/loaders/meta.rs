// ─── Loader Meta ───
// Thin client for the Fabric/Quilt meta services (same REST layout).

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

use crate::core::error::{InstallerError, InstallerResult};

/// One entry of `/versions/game` or `/versions/loader`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaVersion {
    pub version: String,
    /// Quilt doesn't report stability; missing means "assume stable".
    #[serde(default)]
    pub stable: Option<bool>,
}

pub struct LoaderMeta {
    client: reqwest::Client,
    base_url: String,
    label: &'static str,
}

impl LoaderMeta {
    pub fn new(client: reqwest::Client, base_url: &str, label: &'static str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            label,
        }
    }

    pub fn profile_url(&self, game_version: &str, loader_version: &str) -> String {
        format!(
            "{}/versions/loader/{}/{}/profile/json",
            self.base_url, game_version, loader_version
        )
    }

    /// Launcher version JSON for the given game + loader pair.
    pub async fn profile_json(
        &self,
        game_version: &str,
        loader_version: &str,
    ) -> InstallerResult<serde_json::Value> {
        self.get_json(&self.profile_url(game_version, loader_version))
            .await
    }

    pub async fn latest_game_version(&self) -> InstallerResult<String> {
        let versions: Vec<MetaVersion> = self
            .get_json(&format!("{}/versions/game", self.base_url))
            .await?;
        let latest = latest_stable(&versions).ok_or_else(|| {
            InstallerError::LoaderApi(format!("{} Meta lists no game versions", self.label))
        })?;
        info!("Latest {} game version: {}", self.label, latest);
        Ok(latest)
    }

    pub async fn latest_loader_version(&self) -> InstallerResult<String> {
        let versions: Vec<MetaVersion> = self
            .get_json(&format!("{}/versions/loader", self.base_url))
            .await?;
        let latest = latest_stable(&versions).ok_or_else(|| {
            InstallerError::LoaderApi(format!("{} Meta lists no loader versions", self.label))
        })?;
        info!("Latest {} loader version: {}", self.label, latest);
        Ok(latest)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> InstallerResult<T> {
        let resp = self.client.get(url).send().await?;

        if !resp.status().is_success() {
            return Err(InstallerError::LoaderApi(format!(
                "{} Meta returned {} for {}",
                self.label,
                resp.status(),
                url
            )));
        }

        Ok(resp.json::<T>().await?)
    }
}

/// Meta lists newest first.
fn latest_stable(versions: &[MetaVersion]) -> Option<String> {
    versions
        .iter()
        .find(|v| v.stable != Some(false))
        .map(|v| v.version.clone())
}

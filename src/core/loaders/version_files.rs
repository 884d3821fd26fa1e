use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::core::error::{InstallerError, InstallerResult};

/// Write a loader's launcher version JSON into `<base>/versions/<id>/`.
///
/// Alongside `<id>.json` an empty `<id>.jar` is created; the launcher refuses
/// to list versions without one. Returns the version id.
pub async fn write_version_profile(
    base_dir: &Path,
    profile: &Value,
    fallback_id: &str,
) -> InstallerResult<String> {
    let main_class = profile
        .get("mainClass")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if main_class.is_empty() {
        return Err(InstallerError::LoaderApi(
            "loader profile is missing mainClass".into(),
        ));
    }

    let id = profile
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or(fallback_id)
        .to_string();
    validate_version_id(&id)?;

    let version_dir = base_dir.join("versions").join(&id);
    tokio::fs::create_dir_all(&version_dir)
        .await
        .map_err(|e| InstallerError::io(&version_dir, e))?;

    let json_path = version_dir.join(format!("{}.json", id));
    let json = serde_json::to_string_pretty(profile)?;
    tokio::fs::write(&json_path, json)
        .await
        .map_err(|e| InstallerError::io(&json_path, e))?;

    let jar_path = version_dir.join(format!("{}.jar", id));
    tokio::fs::write(&jar_path, b"")
        .await
        .map_err(|e| InstallerError::io(&jar_path, e))?;

    debug!("Wrote version files for {} into {:?}", id, version_dir);
    Ok(id)
}

fn validate_version_id(id: &str) -> InstallerResult<()> {
    if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
        return Err(InstallerError::Loader(format!(
            "refusing to use version id {:?}",
            id
        )));
    }
    Ok(())
}

// ─── Profile Document ───
// In-memory model of the launcher's profiles file. Only the `profiles` entry
// named by the caller is ever rewritten; the rest of the tree round-trips as is.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::profile::{iso_timestamp, ProfileEntry, ProfileTemplate};
use crate::core::error::{InstallerError, InstallerResult};

const PROFILES_KEY: &str = "profiles";

/// What `upsert_profile` did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertKind {
    Created,
    Updated,
}

#[derive(Debug, Clone)]
pub struct ProfileDocument {
    path: PathBuf,
    root: Map<String, Value>,
}

impl ProfileDocument {
    /// Read and parse the profiles file at `path`.
    pub async fn load(path: &Path) -> InstallerResult<Self> {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(InstallerError::ProfileFileNotFound(path.to_path_buf()))
            }
            Err(e) => return Err(InstallerError::io(path, e)),
        };

        Self::parse(path, &raw)
    }

    /// Parse already-read file contents. `path` is only used for error reporting.
    pub fn parse(path: &Path, raw: impl AsRef<[u8]>) -> InstallerResult<Self> {
        let value: Value =
            serde_json::from_slice(raw.as_ref()).map_err(|source| InstallerError::ProfileParse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_value(path, value)
    }

    pub fn from_value(path: &Path, value: Value) -> InstallerResult<Self> {
        let root = match value {
            Value::Object(root) => root,
            other => {
                return Err(InstallerError::InvalidProfileDocument {
                    path: path.to_path_buf(),
                    reason: format!("root is {} instead of an object", json_kind(&other)),
                })
            }
        };

        if let Some(profiles) = root.get(PROFILES_KEY) {
            if !profiles.is_object() {
                return Err(InstallerError::InvalidProfileDocument {
                    path: path.to_path_buf(),
                    reason: format!("`profiles` is {}", json_kind(profiles)),
                });
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// The `profiles` object, created empty in the tree if missing.
    pub fn profiles_mut(&mut self) -> InstallerResult<&mut Map<String, Value>> {
        let path = &self.path;
        let profiles = self
            .root
            .entry(PROFILES_KEY)
            .or_insert_with(|| Value::Object(Map::new()));

        match profiles {
            Value::Object(map) => Ok(map),
            other => Err(InstallerError::InvalidProfileDocument {
                path: path.clone(),
                reason: format!("`profiles` is {}", json_kind(other)),
            }),
        }
    }

    /// Typed view of a single profile, if present.
    pub fn profile(&self, name: &str) -> InstallerResult<Option<ProfileEntry>> {
        match self.root.get(PROFILES_KEY).and_then(|p| p.get(name)) {
            Some(value) => Ok(Some(self.entry_from_value(name, value.clone())?)),
            None => Ok(None),
        }
    }

    /// Create-or-update the profile called `name`.
    ///
    /// A missing entry is built from `template`; an existing one only gets its
    /// `lastUsed` refreshed. `mutator` runs in both cases.
    pub fn upsert_profile<F>(
        &mut self,
        name: &str,
        template: &ProfileTemplate,
        now: DateTime<Utc>,
        mutator: F,
    ) -> InstallerResult<UpsertKind>
    where
        F: FnOnce(&mut ProfileEntry),
    {
        let existing = self.profiles_mut()?.get(name).cloned();

        let (mut entry, mut target, kind) = match existing {
            Some(value) => {
                let entry = self.entry_from_value(name, value.clone())?;
                let target = match value {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                (entry, target, UpsertKind::Updated)
            }
            None => (template.build(name, now), Map::new(), UpsertKind::Created),
        };

        if kind == UpsertKind::Updated {
            entry.last_used = Some(iso_timestamp(now));
        }
        mutator(&mut entry);
        entry.write_into(&mut target)?;

        self.profiles_mut()?
            .insert(name.to_string(), Value::Object(target));

        debug!("{:?} profile '{}' in {:?}", kind, name, self.path);
        Ok(kind)
    }

    /// Serialize the whole tree and atomically replace the file at `path`.
    pub async fn save(&self, path: &Path) -> InstallerResult<()> {
        let json = serde_json::to_string_pretty(&self.root)?;
        atomic_write(path, json.as_bytes())
            .await
            .map_err(|source| InstallerError::ProfileWrite {
                path: path.to_path_buf(),
                source,
            })
    }

    fn entry_from_value(&self, name: &str, value: Value) -> InstallerResult<ProfileEntry> {
        if !value.is_object() {
            return Err(InstallerError::InvalidProfileDocument {
                path: self.path.clone(),
                reason: format!("profile '{}' is {}", name, json_kind(&value)),
            });
        }
        serde_json::from_value(value).map_err(|e| InstallerError::InvalidProfileDocument {
            path: self.path.clone(),
            reason: format!("profile '{}': {}", name, e),
        })
    }
}

/// Write to `<path>.tmp`, fsync, then rename over `path`.
///
/// The replacement keeps the permission bits of the file it replaces.
async fn atomic_write(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp_path = {
        let mut name = path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    };

    let result = async {
        let mut file = tokio::fs::File::create(&tmp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);
        if let Ok(meta) = tokio::fs::metadata(path).await {
            tokio::fs::set_permissions(&tmp_path, meta.permissions()).await?;
        }
        tokio::fs::rename(&tmp_path, path).await
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(&tmp_path).await;
    }
    result
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

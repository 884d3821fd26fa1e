use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value of `type` for profiles the installer creates.
pub const CUSTOM_PROFILE_TYPE: &str = "custom";

/// One entry of the launcher's `profiles` object.
///
/// Only the fields the installer reads or writes are typed; everything else a
/// user (or the launcher) stored on the entry is kept in `extra` verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_args: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_version_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileEntry {
    /// Write this entry's fields into an existing JSON object.
    ///
    /// Keys already present keep their position; keys this entry doesn't carry
    /// are left alone.
    pub fn write_into(&self, target: &mut Map<String, Value>) -> serde_json::Result<()> {
        if let Value::Object(fields) = serde_json::to_value(self)? {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        Ok(())
    }
}

/// Fixed parts of a freshly created profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTemplate {
    pub icon: String,
    pub java_args: String,
}

impl ProfileTemplate {
    /// Build a brand new entry named `name`, stamped with `now`.
    pub fn build(&self, name: &str, now: DateTime<Utc>) -> ProfileEntry {
        let stamp = iso_timestamp(now);
        ProfileEntry {
            name: Some(name.to_string()),
            profile_type: Some(CUSTOM_PROFILE_TYPE.to_string()),
            created: Some(stamp.clone()),
            last_used: Some(stamp),
            icon: Some(self.icon.clone()),
            java_args: Some(self.java_args.clone()),
            last_version_id: None,
            extra: Map::new(),
        }
    }
}

/// Timestamp format the launcher itself writes (`2024-01-31T12:00:00.000Z`).
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn template() -> ProfileTemplate {
        ProfileTemplate {
            icon: "Furnace".into(),
            java_args: "-Xmx4G -javaagent:unsup.jar".into(),
        }
    }

    #[test]
    fn timestamp_has_millis_and_zulu_suffix() {
        let at = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 5).unwrap();
        assert_eq!(iso_timestamp(at), "2024-01-31T12:00:05.000Z");
    }

    #[test]
    fn build_fills_creation_fields() {
        let at = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
        let entry = template().build("Loader - 1.20", at);

        assert_eq!(entry.name.as_deref(), Some("Loader - 1.20"));
        assert_eq!(entry.profile_type.as_deref(), Some("custom"));
        assert_eq!(entry.created, entry.last_used);
        assert_eq!(entry.icon.as_deref(), Some("Furnace"));
        assert!(entry.last_version_id.is_none());
    }

    #[test]
    fn serializes_with_launcher_field_names() {
        let at = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
        let mut entry = template().build("P", at);
        entry.last_version_id = Some("fabric-loader-0.15.0-1.20".into());

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "custom");
        assert_eq!(value["lastVersionId"], "fabric-loader-0.15.0-1.20");
        assert_eq!(value["javaArgs"], "-Xmx4G -javaagent:unsup.jar");
        assert_eq!(value["lastUsed"], "2024-01-31T12:00:00.000Z");
    }

    #[test]
    fn write_into_keeps_unknown_fields_and_order() {
        let mut existing = json!({
            "gameDir": "/games/pack",
            "lastVersionId": "old",
            "resolution": { "width": 854, "height": 480 }
        })
        .as_object()
        .cloned()
        .unwrap();

        let mut entry: ProfileEntry = serde_json::from_value(Value::Object(existing.clone())).unwrap();
        entry.last_version_id = Some("new".into());
        entry.write_into(&mut existing).unwrap();

        let keys: Vec<_> = existing.keys().cloned().collect();
        assert_eq!(keys, vec!["gameDir", "lastVersionId", "resolution"]);
        assert_eq!(existing["lastVersionId"], "new");
        assert_eq!(existing["resolution"]["width"], 854);
    }
}

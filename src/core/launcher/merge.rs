use chrono::Utc;

use super::document::{ProfileDocument, UpsertKind};
use super::profile::ProfileTemplate;
use crate::core::error::InstallerResult;

/// Profile name for a game version, e.g. `"Fabric Loader - 1.20.1"`.
///
/// Repeated installs for the same game version land on the same entry.
pub fn profile_name(prefix: &str, game_version: &str) -> String {
    format!("{} - {}", prefix, game_version)
}

/// Point the profile `profile_name` at `loader_version_id`, creating it if needed.
pub fn merge(
    document: &mut ProfileDocument,
    profile_name: &str,
    loader_version_id: &str,
    template: &ProfileTemplate,
) -> InstallerResult<UpsertKind> {
    document.upsert_profile(profile_name, template, Utc::now(), |entry| {
        entry.last_version_id = Some(loader_version_id.to_string());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::path::Path;

    fn template() -> ProfileTemplate {
        ProfileTemplate {
            icon: "Furnace".into(),
            java_args: "-Xmx4G -javaagent:unsup.jar".into(),
        }
    }

    fn doc(value: Value) -> ProfileDocument {
        ProfileDocument::from_value(Path::new("launcher_profiles.json"), value).unwrap()
    }

    #[test]
    fn profile_name_is_deterministic() {
        assert_eq!(profile_name("Loader", "1.20"), "Loader - 1.20");
        assert_eq!(profile_name("Loader", "1.20"), profile_name("Loader", "1.20"));
    }

    #[test]
    fn fresh_install_creates_custom_profile() {
        let mut document = doc(json!({}));

        let kind = merge(&mut document, "Loader - 1.20", "loader-1.20-0.15.0", &template()).unwrap();
        assert_eq!(kind, UpsertKind::Created);

        let value = document.as_value();
        let profile = &value["profiles"]["Loader - 1.20"];
        assert_eq!(profile["lastVersionId"], "loader-1.20-0.15.0");
        assert_eq!(profile["type"], "custom");
        assert_eq!(profile["name"], "Loader - 1.20");
    }

    #[test]
    fn repeat_install_updates_version_and_keeps_created() {
        let mut document = doc(json!({}));
        merge(&mut document, "Loader - 1.20", "loader-1.20-0.15.0", &template()).unwrap();
        let first = document.profile("Loader - 1.20").unwrap().unwrap();

        let kind = merge(&mut document, "Loader - 1.20", "loader-1.20-0.16.0", &template()).unwrap();
        assert_eq!(kind, UpsertKind::Updated);

        let second = document.profile("Loader - 1.20").unwrap().unwrap();
        assert_eq!(second.last_version_id.as_deref(), Some("loader-1.20-0.16.0"));
        assert_eq!(second.created, first.created);
    }

    #[test]
    fn merge_is_idempotent_apart_from_last_used() {
        let mut document = doc(json!({}));
        merge(&mut document, "P", "v1", &template()).unwrap();
        let first = document.profile("P").unwrap().unwrap();

        merge(&mut document, "P", "v1", &template()).unwrap();
        let mut second = document.profile("P").unwrap().unwrap();

        second.last_used = first.last_used.clone();
        assert_eq!(first, second);
        assert_eq!(document.profiles_mut().unwrap().len(), 1);
    }

    #[test]
    fn user_customizations_survive_update() {
        let mut document = doc(json!({
            "profiles": {
                "P": {
                    "name": "My renamed pack",
                    "type": "custom",
                    "created": "2020-01-01T00:00:00.000Z",
                    "icon": "Diamond_Block",
                    "javaArgs": "-Xmx8G",
                    "gameDir": "/packs/p",
                    "lastVersionId": "v1"
                }
            }
        }));

        merge(&mut document, "P", "v2", &template()).unwrap();

        let value = document.as_value();
        let profile = &value["profiles"]["P"];
        assert_eq!(profile["name"], "My renamed pack");
        assert_eq!(profile["created"], "2020-01-01T00:00:00.000Z");
        assert_eq!(profile["icon"], "Diamond_Block");
        assert_eq!(profile["javaArgs"], "-Xmx8G");
        assert_eq!(profile["gameDir"], "/packs/p");
        assert_eq!(profile["lastVersionId"], "v2");
    }

    #[test]
    fn unrelated_keys_and_profiles_are_preserved() {
        let input = json!({
            "settings": { "crashAssistance": true },
            "version": 3,
            "authenticationDatabase": { "abc": { "username": "steve" } },
            "profiles": {
                "vanilla": { "name": "", "type": "latest-release", "lastVersionId": "latest-release" },
                "snap": { "name": "", "type": "latest-snapshot", "lastVersionId": "latest-snapshot" }
            }
        });
        let mut document = doc(input.clone());

        merge(&mut document, "Loader - 1.20", "loader-1.20-0.15.0", &template()).unwrap();
        let output = document.as_value();

        for key in ["settings", "version", "authenticationDatabase"] {
            assert_eq!(output[key], input[key]);
        }
        let profiles = output["profiles"].as_object().unwrap();
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles["vanilla"], input["profiles"]["vanilla"]);
        assert_eq!(profiles["snap"], input["profiles"]["snap"]);
    }
}

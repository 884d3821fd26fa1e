// ─── Installer Core ───
// Puts a mod loader into a game launcher directory and registers a launch
// profile for it.
//
// Architecture:
//   core/
//     launcher/  : Launcher variants, profiles document, profile merge
//     install/   : Orchestrator, variant selection, events, outcome
//     loaders/   : Fabric + Quilt version files via their meta services
//     companion/ : Updater agent installed next to the loader
//     downloader/: Concurrent downloads with SHA-1 validation
//     settings   : Installer configuration

pub mod companion;
pub mod downloader;
pub mod error;
pub mod http;
pub mod install;
pub mod launcher;
pub mod loaders;
pub mod settings;

pub mod context;
pub mod fabric;
pub mod installer;
pub mod meta;
pub mod quilt;
pub mod version_files;

pub use context::InstallContext;
pub use installer::{Installer, LoaderInstallResult, LoaderInstaller, LoaderKind};
pub use meta::LoaderMeta;

pub mod document;
pub mod merge;
pub mod process;
pub mod profile;
pub mod variant;

pub use document::{ProfileDocument, UpsertKind};
pub use merge::{merge, profile_name};
pub use profile::{ProfileEntry, ProfileTemplate};
pub use variant::{discover, LauncherVariant};

pub mod events;
pub mod mods_dir;
pub mod orchestrator;
pub mod outcome;
pub mod selector;

pub use events::{InstallEvent, InstallStage, ProgressSink};
pub use orchestrator::{InstallOrchestrator, InstallRequest, ProfilePolicy};
pub use outcome::{FailedStage, InstallOutcome, InstallReport, InstallWarning, RegisteredProfile};
pub use selector::{resolve_variant, FlagSelector, PromptSelector, Selection, VariantSelector};

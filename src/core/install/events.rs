use std::fmt;

use tokio::sync::mpsc::UnboundedSender;

use super::outcome::InstallWarning;

/// Milestones of one install run, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    Start,
    VariantResolved,
    LoaderInstalled,
    ProfileMerged,
    CompanionInstalled,
    Done,
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstallStage::Start => "Starting install",
            InstallStage::VariantResolved => "Launcher selected",
            InstallStage::LoaderInstalled => "Loader installed",
            InstallStage::ProfileMerged => "Launcher profile updated",
            InstallStage::CompanionInstalled => "Updater installed",
            InstallStage::Done => "Done",
        };
        f.write_str(label)
    }
}

/// Everything the orchestrator reports while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum InstallEvent {
    Stage(InstallStage),
    Message(String),
    Download {
        file_name: String,
        bytes: u64,
        total_bytes: Option<u64>,
    },
    Warning(InstallWarning),
}

/// Cheap, cloneable handle for emitting [`InstallEvent`]s.
///
/// A disabled sink drops everything; a closed receiver is ignored.
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    tx: Option<UnboundedSender<InstallEvent>>,
}

impl ProgressSink {
    pub fn new(tx: UnboundedSender<InstallEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, event: InstallEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    pub fn message(&self, message: impl Into<String>) {
        self.emit(InstallEvent::Message(message.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_forwards_events() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let sink = ProgressSink::new(tx);

        sink.emit(InstallEvent::Stage(InstallStage::Start));
        sink.message("hello");

        assert_eq!(rx.try_recv().unwrap(), InstallEvent::Stage(InstallStage::Start));
        assert_eq!(rx.try_recv().unwrap(), InstallEvent::Message("hello".into()));
    }

    #[test]
    fn sink_survives_dropped_receiver() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        ProgressSink::new(tx).message("nobody listens");
        ProgressSink::disabled().message("nobody listens either");
    }
}

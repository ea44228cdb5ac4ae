//! Watch event types
//!
//! One discrete notification emitted by the change-monitoring loop for a
//! given file. The sequence for a watch is: exactly one `Initial`, zero or
//! more `Update`s, then optionally one terminal `Deleted` or `Error`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A change notification for a watched file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum WatchEvent {
    /// Snapshot emitted once when the watch starts
    Initial { path: PathBuf, content: String },
    /// The file's modification timestamp advanced; carries the re-read content
    Update { path: PathBuf, content: String },
    /// The file disappeared; the sequence ends
    Deleted { path: PathBuf },
    /// Watching failed; the sequence ends
    Error { path: PathBuf, message: String },
}

impl WatchEvent {
    /// The watched path this event refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::Initial { path, .. } => path,
            Self::Update { path, .. } => path,
            Self::Deleted { path } => path,
            Self::Error { path, .. } => path,
        }
    }

    /// Whether the sequence ends after this event
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Deleted { .. } | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_event_tags_are_stable() {
        let initial = WatchEvent::Initial {
            path: PathBuf::from("a.txt"),
            content: "x".to_string(),
        };
        let json = serde_json::to_value(&initial).unwrap();
        assert_eq!(json["event"], "initial");
        assert_eq!(json["content"], "x");

        let deleted = WatchEvent::Deleted {
            path: PathBuf::from("a.txt"),
        };
        let json = serde_json::to_value(&deleted).unwrap();
        assert_eq!(json["event"], "deleted");
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_terminal_events() {
        let update = WatchEvent::Update {
            path: PathBuf::from("a.txt"),
            content: String::new(),
        };
        assert!(!update.is_terminal());

        let error = WatchEvent::Error {
            path: PathBuf::from("a.txt"),
            message: "boom".to_string(),
        };
        assert!(error.is_terminal());
        assert!(WatchEvent::Deleted {
            path: PathBuf::from("a.txt")
        }
        .is_terminal());
    }

    #[test]
    fn test_path_accessor() {
        let event = WatchEvent::Error {
            path: PathBuf::from("logs/app.log"),
            message: "io".to_string(),
        };
        assert_eq!(event.path(), Path::new("logs/app.log"));
    }
}

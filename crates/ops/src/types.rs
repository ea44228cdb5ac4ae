//! Result types for the filesystem operations
//!
//! Produced fresh on every call and handed to the transport for
//! serialization; nothing here is cached between calls.

use serde::{Deserialize, Serialize};

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Entry name, without any leading path
    pub name: String,

    /// Whether this is a file or a directory
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Size in bytes; present for files only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,

    /// True iff the name begins with a dot
    pub is_hidden: bool,
}

/// One line-level match produced by a content search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// Path of the file containing the match
    pub file_path: String,

    /// 1-based line number of the matching line
    pub line_number: u32,

    /// The matching line, trimmed of surrounding whitespace; present only
    /// when content was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_content: Option<String>,
}

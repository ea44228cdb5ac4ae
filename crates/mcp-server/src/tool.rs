//! MCP tool definitions for the filesystem server
//!
//! Defines the input schemas for the `read_file`, `list_directory`,
//! `search_files` and `watch_file` tools.

use schemars::JsonSchema;
use serde::Deserialize;

/// Request schema for the read_file tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadFileInput {
    /// Path to the file to read, relative to the workspace root (absolute
    /// paths are accepted when they stay inside the workspace).
    #[schemars(description = "Relative or absolute path to the file to read")]
    pub path: String,
}

/// Request schema for the list_directory tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListDirectoryInput {
    /// Directory to list. Omit to list the workspace root.
    #[schemars(
        description = "Relative or absolute path to the directory to list. Defaults to the workspace root."
    )]
    pub path: Option<String>,
}

/// Request schema for the search_files tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchFilesInput {
    /// Regular expression applied to each line of each searchable file.
    #[schemars(description = "Regular expression pattern to search for in file contents")]
    pub pattern: String,

    /// Directory subtree to search. Omit to search the whole workspace.
    #[schemars(
        description = "Relative or absolute path to the directory to search in. Defaults to the workspace root."
    )]
    pub path: Option<String>,

    /// Cap on the number of matches returned (default 100).
    #[schemars(description = "Maximum number of matches to return (default 100)")]
    pub max_results: Option<usize>,

    /// Include the matching line's text in each result.
    #[schemars(description = "Whether to include the matching line content (default false)")]
    pub include_content: Option<bool>,
}

/// Request schema for the watch_file tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WatchFileInput {
    /// File to observe for changes.
    #[schemars(description = "Relative or absolute path to the file to watch")]
    pub path: String,

    /// Observation window; the tool returns when it elapses or a terminal
    /// event arrives, whichever comes first.
    #[schemars(description = "How long to observe the file, in milliseconds (default 10000)")]
    pub duration_ms: Option<u64>,

    /// Return early once this many events have been collected.
    #[schemars(description = "Stop after this many events have been observed")]
    pub max_events: Option<usize>,
}

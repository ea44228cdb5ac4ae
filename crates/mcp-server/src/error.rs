//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP server operations
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors that can occur while running the MCP server
///
/// Operation-level failures are `fsserve_core::Error` and are mapped to
/// MCP error data per tool call; this type covers the server lifecycle.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("MCP transport error: {0}")]
    Transport(String),
}

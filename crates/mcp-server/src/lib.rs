#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! MCP server for fsserve
//!
//! Provides a Model Context Protocol server exposing workspace-sandboxed
//! filesystem tools: `read_file`, `list_directory`, `search_files` and
//! `watch_file`.

mod error;
mod server;
mod tool;

pub use error::{McpError, Result};
pub use server::{run_mcp_server, FsserveMcpServer};

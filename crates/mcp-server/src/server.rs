//! MCP server implementation for fsserve
//!
//! Exposes the sandboxed filesystem operations as MCP tools using the
//! rmcp SDK with stdio transport.

use crate::error::McpError;
use crate::tool::{ListDirectoryInput, ReadFileInput, SearchFilesInput, WatchFileInput};
use fsserve_core::{Error, Sandbox};
use fsserve_ops as ops;
use fsserve_watcher::{ChangeWatcher, WatchEvent, WatchOptions};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorCode, ErrorData, Implementation, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Default observation window for the watch_file tool
const DEFAULT_WATCH_WINDOW_MS: u64 = 10_000;

/// MCP server exposing sandboxed filesystem access
#[derive(Clone)]
pub struct FsserveMcpServer {
    tool_router: ToolRouter<Self>,
    sandbox: Arc<Sandbox>,
    watch_options: WatchOptions,
}

impl std::fmt::Debug for FsserveMcpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsserveMcpServer")
            .field("sandbox", &self.sandbox)
            .field("watch_options", &self.watch_options)
            .finish()
    }
}

impl FsserveMcpServer {
    /// Create a new MCP server instance
    pub fn new(sandbox: Arc<Sandbox>, watch_options: WatchOptions) -> Self {
        Self {
            tool_router: Self::tool_router(),
            sandbox,
            watch_options,
        }
    }
}

#[tool_router]
impl FsserveMcpServer {
    /// Read the contents of a file inside the workspace.
    #[tool(
        name = "read_file",
        description = "Read the contents of a text file within the workspace. Only files inside the workspace root can be accessed; paths matching the exclusion patterns (version control metadata, caches, environment files) are denied."
    )]
    async fn read_file(
        &self,
        Parameters(input): Parameters<ReadFileInput>,
    ) -> Result<CallToolResult, ErrorData> {
        info!("Executing read_file: path={}", input.path);

        let content = ops::read_file(&self.sandbox, Path::new(&input.path))
            .await
            .map_err(to_error_data)?;

        Ok(CallToolResult::success(vec![Content::text(content)]))
    }

    /// List the immediate children of a workspace directory.
    #[tool(
        name = "list_directory",
        description = "List the contents of a directory within the workspace. Returns name, type, size (files only) and a hidden flag for each entry. Entries matching the exclusion patterns are omitted."
    )]
    async fn list_directory(
        &self,
        Parameters(input): Parameters<ListDirectoryInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let path = input.path.as_deref().unwrap_or(".");
        info!("Executing list_directory: path={path}");

        let entries = ops::list_directory(&self.sandbox, Path::new(path))
            .await
            .map_err(to_error_data)?;

        let json = serde_json::to_string_pretty(&entries).map_err(serialization_error)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Search file contents under a workspace directory.
    #[tool(
        name = "search_files",
        description = "Search for lines matching a regex pattern in files under a workspace directory. Returns file path and 1-based line number per match, optionally with the matching line. Excluded directories are not descended into; binary files are skipped."
    )]
    async fn search_files(
        &self,
        Parameters(input): Parameters<SearchFilesInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let path = input.path.as_deref().unwrap_or(".");
        let max_results = input.max_results.unwrap_or(ops::DEFAULT_MAX_RESULTS);
        let include_content = input.include_content.unwrap_or(false);
        info!("Executing search_files: pattern={} path={path}", input.pattern);

        let matches = ops::search_files(
            &self.sandbox,
            &input.pattern,
            Path::new(path),
            max_results,
            include_content,
        )
        .await
        .map_err(to_error_data)?;

        info!("search_files completed: {} matches", matches.len());

        let json = serde_json::to_string_pretty(&matches).map_err(serialization_error)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Observe a file for changes over a bounded window.
    #[tool(
        name = "watch_file",
        description = "Observe a workspace file for changes for a bounded window and return the events seen. The first event is always an 'initial' snapshot of the file content; subsequent events are 'update' (with new content), 'deleted', or 'error'. The tool returns when the window elapses, a terminal event arrives, or max_events is reached."
    )]
    async fn watch_file(
        &self,
        Parameters(input): Parameters<WatchFileInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let window = Duration::from_millis(input.duration_ms.unwrap_or(DEFAULT_WATCH_WINDOW_MS));
        info!("Executing watch_file: path={} window={window:?}", input.path);

        let watcher = ChangeWatcher::new(Arc::clone(&self.sandbox), self.watch_options.clone());
        let mut events = watcher
            .watch(Path::new(&input.path))
            .await
            .map_err(to_error_data)?;

        let mut collected: Vec<WatchEvent> = Vec::new();
        let deadline = tokio::time::Instant::now() + window;
        loop {
            if input
                .max_events
                .is_some_and(|cap| collected.len() >= cap)
            {
                break;
            }
            let event = match tokio::time::timeout_at(deadline, events.recv()).await {
                Ok(Some(event)) => event,
                // Channel closed or window elapsed
                Ok(None) | Err(_) => break,
            };
            let terminal = event.is_terminal();
            collected.push(event);
            if terminal {
                break;
            }
        }
        watcher.stop();

        info!("watch_file completed: {} events", collected.len());

        let json = serde_json::to_string_pretty(&collected).map_err(serialization_error)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for FsserveMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fsserve".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Workspace-sandboxed filesystem access. Use read_file, list_directory \
                and search_files to explore files within the workspace root, and \
                watch_file to observe a file for changes."
                    .to_string(),
            ),
        }
    }
}

/// Convert a core error to rmcp ErrorData, preserving the semantic kind
fn to_error_data(err: Error) -> ErrorData {
    let code = match &err {
        Error::AccessDenied { .. } | Error::InvalidPattern(_) => ErrorCode::INVALID_PARAMS,
        Error::NotFound { .. } => ErrorCode::RESOURCE_NOT_FOUND,
        Error::Decode { .. } | Error::Config(_) | Error::Internal(_) => ErrorCode::INTERNAL_ERROR,
    };
    ErrorData {
        code,
        message: err.to_string().into(),
        data: None,
    }
}

fn serialization_error(err: serde_json::Error) -> ErrorData {
    ErrorData {
        code: ErrorCode::INTERNAL_ERROR,
        message: format!("Failed to serialize results: {err}").into(),
        data: None,
    }
}

/// Run the MCP server with stdio transport
///
/// This is the main entry point for the `fsserve serve` command. It sets up
/// the MCP server and runs it until the client disconnects.
pub async fn run_mcp_server(sandbox: Arc<Sandbox>, watch_options: WatchOptions) -> crate::Result<()> {
    info!(
        "Starting MCP server for workspace {}",
        sandbox.root().display()
    );

    let server = FsserveMcpServer::new(sandbox, watch_options);

    // Start server with stdio transport
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| McpError::Transport(e.to_string()))?;

    info!("MCP server started, waiting for client requests");

    // Wait for the server to complete (client disconnect or error)
    service
        .waiting()
        .await
        .map_err(|e| McpError::Transport(e.to_string()))?;

    info!("MCP server shutting down");
    Ok(())
}

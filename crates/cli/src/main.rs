//! fsserve CLI - Workspace Filesystem MCP Server
//!
//! This binary provides the command-line interface for the fsserve system.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fsserve_core::{Config, Sandbox};
use fsserve_mcp_server::run_mcp_server;
use fsserve_watcher::{ChangeWatcher, WatchOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "fsserve")]
#[command(about = "Workspace-sandboxed filesystem access over MCP")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio
    Serve,
    /// Watch a file and print change events as JSON lines
    Watch {
        /// File to watch, relative to the workspace root
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute commands
    match cli.command {
        Some(Commands::Serve) => serve(cli.config.as_deref()).await,
        Some(Commands::Watch { path }) => watch(cli.config.as_deref(), &path).await,
        None => {
            println!("Run 'fsserve serve' to start the MCP server, or --help for more options");
            Ok(())
        }
    }
}

/// Initialize logging system
///
/// Logs go to stderr; stdout belongs to the MCP transport.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fsserve={level},fsserve_core={level},fsserve_ops={level},\
             fsserve_watcher={level},fsserve_mcp_server={level}"
        ))
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration and build the workspace sandbox
fn build_sandbox(config_path: Option<&Path>) -> Result<(Sandbox, Config)> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let root = config.workspace_root()?;
    let sandbox = Sandbox::new(root, &config.workspace.exclude)?;
    Ok((sandbox, config))
}

fn watch_options(config: &Config) -> WatchOptions {
    WatchOptions::builder()
        .poll_interval_ms(config.watch.poll_interval_ms)
        .channel_capacity(config.watch.channel_capacity)
        .build()
}

/// Start the MCP server
async fn serve(config_path: Option<&Path>) -> Result<()> {
    let (sandbox, config) = build_sandbox(config_path)?;
    info!("Workspace root: {}", sandbox.root().display());

    run_mcp_server(Arc::new(sandbox), watch_options(&config))
        .await
        .context("MCP server failed")?;
    Ok(())
}

/// Watch a single file, printing each event as a JSON line until a terminal
/// event or Ctrl-C
async fn watch(config_path: Option<&Path>, path: &Path) -> Result<()> {
    let (sandbox, config) = build_sandbox(config_path)?;

    let watcher = ChangeWatcher::new(Arc::new(sandbox), watch_options(&config));
    let mut events = watcher.watch(path).await?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                watcher.stop();
                break;
            }
            event = events.recv() => {
                match event {
                    Some(event) => {
                        println!("{}", serde_json::to_string(&event)?);
                        if event.is_terminal() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}

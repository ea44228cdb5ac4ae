#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! File change monitoring for the fsserve system
//!
//! Watches a single file by polling its modification timestamp on a fixed
//! interval, emitting an initial content snapshot followed by update,
//! deletion, and error events through a bounded channel.
//!
//! # Example
//!
//! ```no_run
//! use fsserve_core::Sandbox;
//! use fsserve_watcher::{ChangeWatcher, WatchOptions};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sandbox = Arc::new(Sandbox::new("/path/to/workspace", &[])?);
//! let watcher = ChangeWatcher::new(sandbox, WatchOptions::default());
//!
//! let mut events = watcher.watch("notes.txt").await?;
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod events;
mod watcher;

pub use config::WatchOptions;
pub use events::WatchEvent;
pub use watcher::ChangeWatcher;

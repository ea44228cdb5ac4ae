//! Core types for the fsserve workspace filesystem service
//!
//! This crate provides the foundational pieces shared by every fsserve
//! component:
//!
//! - **Sandbox**: the workspace containment and exclusion-pattern gate
//! - **Configuration**: layered configuration loading and validation
//! - **Error handling**: unified error type with semantic kinds
//!

pub mod config;
pub mod error;
pub mod sandbox;

// Re-export main types for convenience
pub use config::{Config, WatchConfig, WorkspaceConfig};
pub use error::{Error, Result};
pub use sandbox::Sandbox;

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::sandbox::Sandbox;
}

//! Configuration for the fsserve system
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables. Environment variables are prefixed with
//! `FSSERVE_` and use double underscores for nested values, for example
//! `FSSERVE_WATCH__POLL_INTERVAL_MS=500`.
//!
//! The resulting [`Config`] is constructed once at startup and passed by
//! reference; nothing reads configuration through ambient global state.

use crate::error::{Error, Result};
use config::{Config as ConfigLib, Environment, File};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_channel_capacity() -> usize {
    64
}

/// Default exclusion patterns covering version-control metadata, bytecode
/// caches, OS metadata files, and environment files
pub fn default_exclude_patterns() -> Vec<String> {
    vec![
        r"\.git".to_string(),
        r"__pycache__".to_string(),
        r"\.pyc$".to_string(),
        r"\.pyo$".to_string(),
        r"\.pyd$".to_string(),
        r"\.DS_Store".to_string(),
        r"\.env".to_string(),
    ]
}

/// Workspace sandbox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Absolute workspace root; `None` resolves to the process working
    /// directory at load time
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Regex fragments identifying paths that are off-limits even inside
    /// the workspace root
    #[serde(default = "default_exclude_patterns")]
    pub exclude: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: None,
            exclude: default_exclude_patterns(),
        }
    }
}

/// File watch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Poll interval in milliseconds (default: 1000ms)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Capacity of the watch event channel (default: 64)
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

/// Main configuration structure for the fsserve system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Workspace sandbox configuration
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// File watch configuration
    #[serde(default)]
    pub watch: WatchConfig,
}

impl Config {
    /// Loads configuration from an optional TOML file with environment
    /// variable overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigLib::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FSSERVE")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Config = builder
            .build()
            .map_err(|e| Error::config(format!("failed to load configuration: {e}")))?
            .try_deserialize()
            .map_err(|e| Error::config(format!("failed to parse configuration: {e}")))?;

        if config.workspace.root.is_none() {
            let cwd = env::current_dir()
                .map_err(|e| Error::config(format!("cannot determine working directory: {e}")))?;
            config.workspace.root = Some(cwd);
        }

        Ok(config)
    }

    /// The resolved workspace root
    ///
    /// Always `Some` after [`Config::load`]; this accessor exists for
    /// configs constructed directly in tests.
    pub fn workspace_root(&self) -> Result<PathBuf> {
        self.workspace
            .root
            .clone()
            .ok_or_else(|| Error::config("workspace root is not set"))
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let root = self.workspace_root()?;
        if !root.is_absolute() {
            return Err(Error::config(format!(
                "workspace root must be an absolute path: {}",
                root.display()
            )));
        }
        if !root.is_dir() {
            return Err(Error::config(format!(
                "workspace root is not a directory: {}",
                root.display()
            )));
        }

        for pattern in &self.workspace.exclude {
            Regex::new(pattern).map_err(|e| {
                Error::config(format!("invalid exclusion pattern `{pattern}`: {e}"))
            })?;
        }

        if self.watch.poll_interval_ms == 0 {
            return Err(Error::config("watch.poll_interval_ms must be nonzero"));
        }
        if self.watch.channel_capacity == 0 {
            return Err(Error::config("watch.channel_capacity must be nonzero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.watch.poll_interval_ms, 1000);
        assert_eq!(config.watch.channel_capacity, 64);
        assert!(config
            .workspace
            .exclude
            .contains(&r"__pycache__".to_string()));
        assert!(config.workspace.root.is_none());
    }

    #[test]
    fn test_load_fills_in_cwd_root() {
        let config = Config::load(None).unwrap();
        let root = config.workspace_root().unwrap();
        assert!(root.is_absolute());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[watch]\npoll_interval_ms = 250\n\n[workspace]\nexclude = ['secret']\n"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.watch.poll_interval_ms, 250);
        assert_eq!(config.workspace.exclude, vec!["secret".to_string()]);
        // Unset fields keep their defaults
        assert_eq!(config.watch.channel_capacity, 64);
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let config = Config {
            workspace: WorkspaceConfig {
                root: Some(PathBuf::from("/definitely/not/a/real/dir/fsserve")),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            workspace: WorkspaceConfig {
                root: Some(dir.path().to_path_buf()),
                exclude: vec!["[unclosed".to_string()],
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_poll_interval() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            workspace: WorkspaceConfig {
                root: Some(dir.path().to_path_buf()),
                ..Default::default()
            },
            watch: WatchConfig {
                poll_interval_ms: 0,
                ..Default::default()
            },
        };
        assert!(config.validate().is_err());
    }
}

//! Workspace sandbox enforcement
//!
//! Every operation consults the sandbox before touching the filesystem.
//! This is the single gate for path-traversal policy: handlers apply it
//! identically, and it is the only place that needs auditing.

use crate::error::{Error, Result};
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Decides whether a filesystem path may be touched at all
///
/// Pure function of (path, workspace root, exclusion patterns). Immutable
/// after construction; share across concurrent operations with `Arc`
/// without locking.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
    patterns: Vec<Regex>,
}

impl Sandbox {
    /// Builds a sandbox confining access to `root`
    ///
    /// The exclusion patterns are regex fragments matched anywhere in a
    /// path relative to the root. Pattern compilation failures are
    /// configuration errors; the set is fixed for the process lifetime.
    pub fn new(root: impl Into<PathBuf>, patterns: &[String]) -> Result<Self> {
        let root = normalize(&root.into());
        if !root.is_absolute() {
            return Err(Error::config(format!(
                "workspace root must be absolute: {}",
                root.display()
            )));
        }

        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p)
                    .map_err(|e| Error::config(format!("invalid exclusion pattern `{p}`: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { root, patterns })
    }

    /// The workspace root all checks resolve against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `path` against the workspace root and normalizes it
    ///
    /// Relative paths are joined onto the root; `.` and `..` components are
    /// eliminated lexically. The filesystem is never consulted, so the
    /// target does not have to exist.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.root.join(path))
        }
    }

    /// Checks whether `path` may be accessed
    pub fn is_safe(&self, path: &Path) -> bool {
        let resolved = self.resolve(path);
        debug!("checking if path is safe: {}", resolved.display());

        if !resolved.starts_with(&self.root) {
            warn!(
                "path {} is outside workspace root {}",
                resolved.display(),
                self.root.display()
            );
            return false;
        }

        let rel = resolved
            .strip_prefix(&self.root)
            .unwrap_or(&resolved)
            .to_string_lossy()
            .into_owned();
        for pattern in &self.patterns {
            if pattern.is_match(&rel) {
                warn!("path {rel} matches excluded pattern {pattern}");
                return false;
            }
        }

        true
    }

    /// Checks `path` and returns its resolved form, or `AccessDenied`
    pub fn ensure_safe(&self, path: &Path) -> Result<PathBuf> {
        if self.is_safe(path) {
            Ok(self.resolve(path))
        } else {
            Err(Error::access_denied(path.display().to_string()))
        }
    }

    /// Whether a single directory-entry name matches an exclusion pattern
    ///
    /// Used by the lister and searcher to drop excluded children without
    /// inspecting them further.
    pub fn is_excluded_name(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }
}

/// Lexically normalizes a path, eliminating `.` and `..` components
///
/// Popping past the root of an absolute path is a no-op, matching the
/// filesystem's own treatment of `/..`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

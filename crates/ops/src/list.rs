//! Directory listing

use crate::types::{DirectoryEntry, EntryKind};
use fsserve_core::{Error, Result, Sandbox};
use std::path::Path;
use tracing::debug;

/// Lists the immediate children of a directory
///
/// Children whose name matches an exclusion pattern are skipped entirely.
/// Entry order is whatever the filesystem yields; callers must not rely on
/// it.
pub async fn list_directory(sandbox: &Sandbox, path: &Path) -> Result<Vec<DirectoryEntry>> {
    let resolved = sandbox.ensure_safe(path)?;
    debug!("listing directory {}", resolved.display());

    let mut dir = tokio::fs::read_dir(&resolved)
        .await
        .map_err(|e| Error::from_io(&resolved, e))?;

    let mut entries = Vec::new();
    while let Some(entry) = dir
        .next_entry()
        .await
        .map_err(|e| Error::from_io(&resolved, e))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if sandbox.is_excluded_name(&name) {
            continue;
        }

        let file_type = entry
            .file_type()
            .await
            .map_err(|e| Error::from_io(&resolved, e))?;
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        let size_bytes = if kind == EntryKind::File {
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| Error::from_io(&resolved, e))?;
            Some(metadata.len())
        } else {
            None
        };

        let is_hidden = name.starts_with('.');
        entries.push(DirectoryEntry {
            name,
            kind,
            size_bytes,
            is_hidden,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsserve_core::config::default_exclude_patterns;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Sandbox) {
        let dir = TempDir::new().unwrap();
        let sandbox = Sandbox::new(dir.path(), &default_exclude_patterns()).unwrap();
        (dir, sandbox)
    }

    #[tokio::test]
    async fn test_list_mixed_directory() {
        let (dir, sandbox) = setup();
        tokio::fs::write(dir.path().join("a.txt"), "aaaa").await.unwrap();
        tokio::fs::write(dir.path().join("b.txt"), "bb").await.unwrap();
        tokio::fs::create_dir(dir.path().join("sub")).await.unwrap();

        let entries = list_directory(&sandbox, Path::new(".")).await.unwrap();

        // No ordering guarantee, so compare as a set
        let names: HashSet<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, HashSet::from(["a.txt", "b.txt", "sub"]));

        let a = entries.iter().find(|e| e.name == "a.txt").unwrap();
        assert_eq!(a.kind, EntryKind::File);
        assert_eq!(a.size_bytes, Some(4));

        let sub = entries.iter().find(|e| e.name == "sub").unwrap();
        assert_eq!(sub.kind, EntryKind::Directory);
        assert_eq!(sub.size_bytes, None);
    }

    #[tokio::test]
    async fn test_list_skips_excluded_names() {
        let (dir, sandbox) = setup();
        tokio::fs::write(dir.path().join("keep.txt"), "x").await.unwrap();
        tokio::fs::create_dir(dir.path().join(".git")).await.unwrap();
        tokio::fs::create_dir(dir.path().join("__pycache__")).await.unwrap();
        tokio::fs::write(dir.path().join("old.pyc"), "x").await.unwrap();

        let entries = list_directory(&sandbox, Path::new(".")).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["keep.txt"]);
    }

    #[tokio::test]
    async fn test_list_flags_hidden_entries() {
        let (dir, sandbox) = setup();
        tokio::fs::write(dir.path().join(".hidden"), "x").await.unwrap();
        tokio::fs::write(dir.path().join("visible"), "x").await.unwrap();

        let entries = list_directory(&sandbox, Path::new(".")).await.unwrap();
        let hidden = entries.iter().find(|e| e.name == ".hidden").unwrap();
        assert!(hidden.is_hidden);
        let visible = entries.iter().find(|e| e.name == "visible").unwrap();
        assert!(!visible.is_hidden);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_not_found() {
        let (_dir, sandbox) = setup();
        let err = list_directory(&sandbox, Path::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_outside_workspace_is_denied() {
        let (_dir, sandbox) = setup();
        let err = list_directory(&sandbox, Path::new("/tmp")).await.unwrap_err();
        assert!(matches!(err, Error::AccessDenied { .. }));
    }
}

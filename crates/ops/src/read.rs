//! Whole-file text reads

use fsserve_core::{Error, Result, Sandbox};
use std::path::Path;
use tracing::debug;

/// Reads the entire file at `path` as UTF-8 text
///
/// The path must pass the sandbox check. The file is buffered whole, which
/// is acceptable for the intended source and config files; there is no
/// streaming or partial-read mode.
pub async fn read_file(sandbox: &Sandbox, path: &Path) -> Result<String> {
    let resolved = sandbox.ensure_safe(path)?;
    debug!("reading file {}", resolved.display());

    let bytes = tokio::fs::read(&resolved)
        .await
        .map_err(|e| Error::from_io(&resolved, e))?;

    String::from_utf8(bytes).map_err(|_| Error::decode(resolved.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsserve_core::config::default_exclude_patterns;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Sandbox) {
        let dir = TempDir::new().unwrap();
        let sandbox = Sandbox::new(dir.path(), &default_exclude_patterns()).unwrap();
        (dir, sandbox)
    }

    #[tokio::test]
    async fn test_read_roundtrip() {
        let (dir, sandbox) = setup();
        let content = "hello\nworld\n";
        tokio::fs::write(dir.path().join("a.txt"), content)
            .await
            .unwrap();

        let read = read_file(&sandbox, Path::new("a.txt")).await.unwrap();
        assert_eq!(read, content);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let (_dir, sandbox) = setup();
        let err = read_file(&sandbox, Path::new("missing.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_read_binary_file_is_decode_error() {
        let (dir, sandbox) = setup();
        tokio::fs::write(dir.path().join("blob.bin"), [0xffu8, 0xfe, 0x00, 0x80])
            .await
            .unwrap();

        let err = read_file(&sandbox, Path::new("blob.bin")).await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn test_read_outside_workspace_is_denied() {
        let (_dir, sandbox) = setup();
        let err = read_file(&sandbox, Path::new("/etc/hostname"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_read_excluded_path_is_denied() {
        let (dir, sandbox) = setup();
        tokio::fs::create_dir(dir.path().join(".git")).await.unwrap();
        tokio::fs::write(dir.path().join(".git").join("config"), "x")
            .await
            .unwrap();

        let err = read_file(&sandbox, Path::new(".git/config"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AccessDenied { .. }));
    }
}

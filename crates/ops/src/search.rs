//! Recursive regex search over file contents

use crate::types::SearchMatch;
use fsserve_core::{Error, Result, Sandbox};
use regex::Regex;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Default cap on the number of matches returned
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Searches file contents under `path` for lines matching `pattern`
///
/// The pattern is compiled before any filesystem traversal begins.
/// Excluded directories are pruned without being descended into, excluded
/// file names are skipped, and files that cannot be opened or decoded as
/// UTF-8 are silently treated as not searchable. Returns as soon as
/// `max_results` matches have been collected.
pub async fn search_files(
    sandbox: &Sandbox,
    pattern: &str,
    path: &Path,
    max_results: usize,
    include_content: bool,
) -> Result<Vec<SearchMatch>> {
    let root = sandbox.ensure_safe(path)?;

    let regex =
        Regex::new(pattern).map_err(|e| Error::invalid_pattern(format!("`{pattern}`: {e}")))?;
    debug!("searching for `{pattern}` under {}", root.display());

    // The walk is synchronous filesystem work; keep it off the async
    // threads so a concurrent watcher keeps polling.
    let sandbox = sandbox.clone();
    tokio::task::spawn_blocking(move || {
        search_tree(&sandbox, &regex, &root, max_results, include_content)
    })
    .await
    .map_err(|e| Error::internal(format!("search task failed: {e}")))?
}

fn search_tree(
    sandbox: &Sandbox,
    regex: &Regex,
    root: &Path,
    max_results: usize,
    include_content: bool,
) -> Result<Vec<SearchMatch>> {
    let mut results = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        // Prune excluded directories and files by name. The root itself was
        // already checked by the sandbox.
        entry.depth() == 0
            || entry
                .file_name()
                .to_str()
                .map(|name| !sandbox.is_excluded_name(name))
                .unwrap_or(false)
    });

    for entry in walker {
        let entry = entry
            .map_err(|e| Error::internal(format!("walk failed under {}: {e}", root.display())))?;
        if !entry.file_type().is_file() {
            continue;
        }

        // Binary or unreadable files are not searchable; skip them.
        let Ok(content) = std::fs::read_to_string(entry.path()) else {
            continue;
        };

        for (index, line) in content.lines().enumerate() {
            if regex.is_match(line) {
                results.push(SearchMatch {
                    file_path: entry.path().display().to_string(),
                    line_number: (index + 1) as u32,
                    line_content: include_content.then(|| line.trim().to_string()),
                });

                if results.len() >= max_results {
                    debug!("max results ({max_results}) reached");
                    return Ok(results);
                }
            }
        }
    }

    Ok(results)
}

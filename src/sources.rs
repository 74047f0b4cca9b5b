//! Source file discovery.
//!
//! Walks the source directory recursively and keeps regular files whose
//! name matches one of the configured glob patterns. Matches are grouped by
//! pattern, in pattern order, so `*.c` files always precede `*.cpp` files
//! on the formatter's command line.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::Result;

/// Deepest directory level visited below the source directory
const MAX_DEPTH: usize = 256;

/// Compile file name patterns, failing on the first invalid one
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(|e| anyhow::anyhow!("invalid pattern '{p}': {e}")))
        .collect()
}

/// Collect all files below `dir` whose file name matches a pattern
///
/// A file goes to the group of the first pattern it matches, groups follow
/// pattern order. Within a group files keep walk order unless `sort` is set.
/// A missing or unreadable `dir` yields an empty list.
#[must_use]
pub fn collect_sources(dir: &Path, patterns: &[Pattern], sort: bool) -> Vec<PathBuf> {
    let mut groups: Vec<Vec<PathBuf>> = vec![Vec::new(); patterns.len()];

    // Symlinked directories are not descended into, so nothing outside `dir`
    // is reached and no file is listed twice. Symlinked files are kept.
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .max_depth(MAX_DEPTH)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        if !entry.path().is_file() {
            continue;
        }
        let matched = {
            let name = entry.file_name().to_string_lossy();
            patterns.iter().position(|p| p.matches(&name))
        };
        if let Some(idx) = matched {
            groups[idx].push(entry.into_path());
        }
    }

    if sort {
        for group in &mut groups {
            group.sort();
        }
    }

    groups.into_iter().flatten().collect()
}

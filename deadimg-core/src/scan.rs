//! Deterministic discovery of image assets and source files.
//!
//! - Early directory pruning via `WalkDir::filter_entry` (O(1) subtree skip)
//! - Entries visited sorted by file name, so discovery order is stable
//!   across runs on an unchanged tree
//! - Exclusion globs matched against the root-relative, forward-slash path

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::common::display_path;
use crate::error::DeadimgError;

/// Directories that are never walked.
const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules"];

/// Default image directories, relative to the project root.
pub const DEFAULT_IMAGE_DIRS: &[&str] = &["src/assets", "public"];

/// Default source directories, relative to the project root.
pub const DEFAULT_SOURCE_DIRS: &[&str] = &["src"];

/// Default image extensions.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Default source extensions (UI, markup, style and script files).
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "vue", "svelte", "html", "css", "scss", "less",
];

/// Compiled exclusion globs.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    globs: Option<GlobSet>,
}

impl ExcludeSet {
    /// Compile exclusion patterns. An empty list excludes nothing.
    ///
    /// `*` and `?` never cross a `/`; only `**` spans directories.
    pub fn new(patterns: &[String]) -> Result<Self, DeadimgError> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| DeadimgError::pattern(pattern.as_str(), e.to_string()))?;
            builder.add(glob);
        }
        let globs = builder
            .build()
            .map_err(|e| DeadimgError::pattern(patterns.join(", "), e.to_string()))?;
        Ok(Self { globs: Some(globs) })
    }

    /// Whether a root-relative, forward-slash path is excluded.
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.globs.as_ref().is_some_and(|g| g.is_match(relative))
    }
}

/// Pruned directories and hidden entries below the walk root.
#[inline]
fn is_pruned(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry.file_name().to_str().is_some_and(|name| {
        name.starts_with('.') || (entry.file_type().is_dir() && EXCLUDED_DIRS.contains(&name))
    })
}

/// Walks `dirs` (relative to `root`) and returns files whose extension is in
/// `extensions`, in discovery order, without duplicates.
///
/// Missing directories are skipped. Directory entries that cannot be read
/// fail the collection with context.
pub fn collect_files(
    root: &Path,
    dirs: &[String],
    extensions: &[String],
    exclude: &ExcludeSet,
) -> Result<Vec<PathBuf>> {
    let wanted: HashSet<&str> = extensions.iter().map(String::as_str).collect();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    for dir in dirs {
        let base = root.join(dir);
        if !base.is_dir() {
            tracing::debug!(dir = %base.display(), "skipping missing directory");
            continue;
        }

        for entry in WalkDir::new(&base)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_pruned(e))
        {
            let entry = entry.with_context(|| format!("Failed to walk {}", base.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let matches_ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| wanted.contains(ext));
            if !matches_ext || exclude.is_excluded(&display_path(root, path)) {
                continue;
            }
            if seen.insert(path.to_path_buf()) {
                files.push(path.to_path_buf());
            }
        }
    }

    Ok(files)
}

/// Collects candidate image files.
pub fn collect_image_files(
    root: &Path,
    dirs: &[String],
    extensions: &[String],
    exclude: &ExcludeSet,
) -> Result<Vec<PathBuf>> {
    let images = collect_files(root, dirs, extensions, exclude)
        .context("Failed to collect image files")?;
    tracing::debug!(count = images.len(), "collected image files");
    Ok(images)
}

/// Collects candidate source files.
pub fn collect_source_files(
    root: &Path,
    dirs: &[String],
    extensions: &[String],
    exclude: &ExcludeSet,
) -> Result<Vec<PathBuf>> {
    let sources = collect_files(root, dirs, extensions, exclude)
        .context("Failed to collect source files")?;
    tracing::debug!(count = sources.len(), "collected source files");
    Ok(sources)
}

/// Owned copy of a default string list.
pub fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

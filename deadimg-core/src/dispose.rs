//! Disposition of unused images: fail the build and/or delete the files.
//!
//! Deletion never panics and never hides a failure. Every file that could not
//! be removed is listed in [`DeleteResult::errors`], so the report and the file
//! system cannot silently drift apart.
//!
//! Progress lines go to stderr; stdout is reserved for the report.

#[cfg(feature = "delete")]
use std::path::{Path, PathBuf};

use crate::error::{DeadimgError, DeadimgResult};

/// Policy applied after the report has been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disposition {
    /// Raise [`DeadimgError::UnusedImages`] when anything is unused
    pub fail_on_unused: bool,
    /// Delete every unused image
    pub delete_unused: bool,
    /// Only print what would be deleted
    pub dry_run: bool,
}

impl Disposition {
    /// The build gate: `Err` if unused images exist and the policy is to fail.
    pub fn check(&self, unused_count: usize) -> DeadimgResult<()> {
        if self.fail_on_unused && unused_count > 0 {
            return Err(DeadimgError::UnusedImages {
                count: unused_count,
            });
        }
        Ok(())
    }
}

/// Result of a delete operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteResult {
    pub files_removed: Vec<String>,
    pub errors: Vec<String>,
}

impl DeleteResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Safely remove a single image file.
///
/// Returns `Ok(false)` if there was nothing to remove (already gone, a
/// symlink, or not a regular file). Symlinks are refused so the link target
/// is never affected.
#[cfg(feature = "delete")]
pub fn remove_file(path: &Path, dry_run: bool) -> DeadimgResult<bool> {
    use crate::error::IoResultExt;

    let metadata = match path.symlink_metadata() {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(DeadimgError::io(path, e)),
    };

    if metadata.file_type().is_symlink() {
        tracing::warn!(path = %path.display(), "refusing to delete symlink");
        return Ok(false);
    }

    if !metadata.is_file() {
        tracing::warn!(path = %path.display(), "not a regular file");
        return Ok(false);
    }

    if dry_run {
        eprintln!("[DRY-RUN] Would delete: {}", path.display());
        return Ok(true);
    }

    std::fs::remove_file(path).with_path(path)?;
    eprintln!("[DELETE] Removed: {}", path.display());
    Ok(true)
}

/// Delete each unused image, continuing past individual failures.
#[cfg(feature = "delete")]
pub fn delete_unused_images(unused: &[PathBuf], dry_run: bool) -> DeleteResult {
    let mut result = DeleteResult::default();

    if unused.is_empty() {
        return result;
    }

    let mode = if dry_run { "DRY-RUN" } else { "DELETE" };
    eprintln!("\n[{}] Processing {} unused image(s)...", mode, unused.len());

    for path in unused {
        match remove_file(path, dry_run) {
            Ok(true) => result.files_removed.push(path.display().to_string()),
            Ok(false) => {}
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to delete image");
                result.errors.push(format!("delete {}: {}", path.display(), e));
            }
        }
    }

    eprintln!("Files removed: {}", result.files_removed.len());
    if !result.errors.is_empty() {
        eprintln!("Errors: {}", result.errors.len());
        for err in &result.errors {
            eprintln!("  - {}", err);
        }
    }

    result
}

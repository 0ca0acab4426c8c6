//! Reference detectors: decide whether a source text refers to an image.
//!
//! Detection is layered. The cheap exact-containment check runs first, then
//! the heuristic detectors that try to catch runtime-built paths. Each layer
//! is a [`ReferenceDetector`], and the index evaluates them in order,
//! stopping at the first hit.
//!
//! ```rust,ignore
//! use deadimg_core::matchers::{default_detectors, ImageTarget, ReferencePattern};
//!
//! let target = ImageTarget::new("public/logo.png");
//! let pattern = ReferencePattern::derive(Path::new("src/App.vue"), &target);
//! let hit = default_detectors().iter().any(|d| d.detects(source_text, &pattern));
//! ```

mod exact;
mod heuristic;

pub use exact::{contains_exact, exact_candidates, ExactMatch};
pub use heuristic::{
    concatenation_reference, identifier_containment, ConcatenationReference,
    IdentifierContainment, StemPatterns,
};

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::common::relative_path;

/// A single reference-detection strategy.
///
/// Implementations must be pure: the answer depends only on the source text
/// and the derived pattern.
pub trait ReferenceDetector: Send + Sync {
    /// Short stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Whether `source` references the image described by `pattern`.
    fn detects(&self, source: &str, pattern: &ReferencePattern<'_>) -> bool;
}

/// The standard detector order: exact match, identifier containment,
/// concatenation reference.
pub fn default_detectors() -> Vec<Box<dyn ReferenceDetector>> {
    vec![
        Box::new(ExactMatch),
        Box::new(IdentifierContainment),
        Box::new(ConcatenationReference),
    ]
}

/// Per-image data that does not depend on which source file is scanned.
#[derive(Debug)]
pub struct ImageTarget {
    /// Path of the image as discovered
    pub path: PathBuf,
    /// Base file name, e.g. `logo.png`
    pub file_name: String,
    /// File name without its last extension, e.g. `logo`
    pub stem: String,
    /// Heuristic regexes, compiled on first use
    stem_patterns: OnceLock<Option<StemPatterns>>,
}

impl ImageTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            stem,
            stem_patterns: OnceLock::new(),
        }
    }

    /// Compiled heuristic patterns for this image's stem.
    ///
    /// `None` if the stem could not be compiled into a regex; heuristics then
    /// report no match for this image.
    pub fn stem_patterns(&self) -> Option<&StemPatterns> {
        self.stem_patterns
            .get_or_init(|| match StemPatterns::compile(&self.stem) {
                Ok(patterns) => Some(patterns),
                Err(e) => {
                    tracing::warn!(image = %self.path.display(), error = %e, "heuristic patterns unavailable");
                    None
                }
            })
            .as_ref()
    }
}

/// Reference candidates for one (source file, image) pair.
#[derive(Debug)]
pub struct ReferencePattern<'a> {
    pub target: &'a ImageTarget,
    /// Path of the image relative to the source file's directory, `/`-separated
    pub relative: String,
}

impl<'a> ReferencePattern<'a> {
    /// Derive the pattern for `target` as seen from `source`.
    pub fn derive(source: &Path, target: &'a ImageTarget) -> Self {
        let source_dir = source.parent().unwrap_or_else(|| Path::new(""));
        Self {
            target,
            relative: relative_path(source_dir, &target.path),
        }
    }

    #[inline]
    pub fn file_name(&self) -> &str {
        &self.target.file_name
    }

    #[inline]
    pub fn stem(&self) -> &str {
        &self.target.stem
    }
}

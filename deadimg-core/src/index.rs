//! Reference index: which discovered images are referenced by any source.
//!
//! Performance characteristics:
//! - Each source file is read once; its text is reused for every image
//! - Images already confirmed used are skipped, bounding work to
//!   O(sources × remaining images)
//! - Parallel reads via Rayon with partition-then-merge: each worker grows
//!   its own [`UsedImageSet`], and the sets are unioned at the end, so no locks
//!
//! An unreadable source is skipped with a warning. Skipping can only move
//! images toward "unused", never drop a usage already recorded.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{DeadimgResult, IoResultExt};
use crate::matchers::{default_detectors, ImageTarget, ReferenceDetector, ReferencePattern};

/// Images found referenced by at least one source file. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedImageSet {
    images: HashSet<PathBuf>,
}

impl UsedImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an image used. Returns `false` if it already was.
    pub fn insert(&mut self, image: impl Into<PathBuf>) -> bool {
        self.images.insert(image.into())
    }

    pub fn contains(&self, image: &Path) -> bool {
        self.images.contains(image)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.images.iter()
    }

    /// Union of two sets.
    pub fn union(mut self, other: Self) -> Self {
        if self.images.len() < other.images.len() {
            return other.union(self);
        }
        self.images.extend(other.images);
        self
    }
}

impl FromIterator<PathBuf> for UsedImageSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}

/// Result of indexing a corpus of sources.
#[derive(Debug, Clone, Default)]
pub struct IndexOutcome {
    pub used: UsedImageSet,
    /// Sources that could not be read and contributed no references
    pub unreadable: Vec<PathBuf>,
}

impl IndexOutcome {
    fn merge(self, other: Self) -> Self {
        let mut unreadable = self.unreadable;
        unreadable.extend(other.unreadable);
        Self {
            used: self.used.union(other.used),
            unreadable,
        }
    }
}

/// Ordered list of reference detectors plus the index-building loop.
pub struct ReferenceIndex {
    detectors: Vec<Box<dyn ReferenceDetector>>,
    parallel: bool,
}

impl Default for ReferenceIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReferenceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceIndex")
            .field("detectors", &self.detector_names())
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl ReferenceIndex {
    /// Index with the default detectors, reading sources in parallel.
    pub fn new() -> Self {
        Self {
            detectors: default_detectors(),
            parallel: true,
        }
    }

    /// Index with an explicit detector list (evaluated in order).
    pub fn with_detectors(detectors: Vec<Box<dyn ReferenceDetector>>) -> Self {
        Self {
            detectors,
            parallel: true,
        }
    }

    /// Append a detector after the existing ones.
    pub fn with_detector(mut self, detector: impl ReferenceDetector + 'static) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    /// Toggle parallel source reads. The resulting set is identical either way.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Name of the first detector that finds `pattern` in `source`, if any.
    pub fn first_hit(&self, source: &str, pattern: &ReferencePattern<'_>) -> Option<&'static str> {
        self.detectors
            .iter()
            .find(|d| d.detects(source, pattern))
            .map(|d| d.name())
    }

    /// Scan one loaded source text, adding every newly referenced image to `used`.
    pub fn scan_source(
        &self,
        source: &Path,
        text: &str,
        targets: &[ImageTarget],
        used: &mut UsedImageSet,
    ) {
        for target in targets {
            if used.contains(&target.path) {
                continue;
            }
            let pattern = ReferencePattern::derive(source, target);
            if let Some(detector) = self.first_hit(text, &pattern) {
                tracing::trace!(
                    image = %target.path.display(),
                    source = %source.display(),
                    detector,
                    "reference found"
                );
                used.insert(target.path.clone());
            }
        }
    }

    /// Build the used-image set for `images` over `sources`.
    pub fn build_used_set(&self, sources: &[PathBuf], images: &[PathBuf]) -> IndexOutcome {
        let targets: Vec<ImageTarget> = images.iter().map(|p| ImageTarget::new(p.clone())).collect();

        let mut outcome = if self.parallel {
            sources
                .par_iter()
                .fold(IndexOutcome::default, |state, source| {
                    self.index_one(state, source, &targets)
                })
                .reduce(IndexOutcome::default, IndexOutcome::merge)
        } else {
            sources
                .iter()
                .fold(IndexOutcome::default(), |state, source| {
                    self.index_one(state, source, &targets)
                })
        };

        outcome.unreadable.sort();
        tracing::debug!(
            sources = sources.len(),
            images = images.len(),
            used = outcome.used.len(),
            unreadable = outcome.unreadable.len(),
            "reference index built"
        );
        outcome
    }

    fn index_one(
        &self,
        mut state: IndexOutcome,
        source: &Path,
        targets: &[ImageTarget],
    ) -> IndexOutcome {
        if state.used.len() == targets.len() {
            return state;
        }
        match read_source(source) {
            Ok(text) => self.scan_source(source, &text, targets, &mut state.used),
            Err(e) => {
                tracing::warn!(source = %source.display(), error = %e, "skipping unreadable source file");
                state.unreadable.push(source.to_path_buf());
            }
        }
        state
    }
}

/// Load a source file as text; invalid UTF-8 is replaced, not rejected.
pub fn read_source(path: &Path) -> DeadimgResult<String> {
    let bytes = fs::read(path).with_path(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Build the used-image set with the default detectors.
pub fn build_used_set(sources: &[PathBuf], images: &[PathBuf]) -> UsedImageSet {
    ReferenceIndex::new().build_used_set(sources, images).used
}

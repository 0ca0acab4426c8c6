//! Builder pattern API for unused image analysis.
//!
//! Provides a fluent interface for configuring and running the pipeline:
//!
//! ```rust,ignore
//! use deadimg_core::prelude::*;
//!
//! let outcome = Deadimg::new("/path/to/project")
//!     .image_dirs(["src/assets", "public"])
//!     .exclude(["**/test-assets/**"])
//!     .fail_on_unused(true)
//!     .run()?;
//!
//! println!("Unused images: {}", outcome.report.unused_count);
//! ```
//!
//! [`Deadimg::analyze`] has no side effects. [`Deadimg::run`] is the
//! build-start step: analyze, write the report, delete if asked, and finally
//! apply the fail-on-unused gate.

use std::path::{Path, PathBuf};

use crate::detect::compute_unused;
use crate::dispose::{DeleteResult, Disposition};
use crate::error::{DeadimgError, DeadimgResult};
use crate::index::{ReferenceIndex, UsedImageSet};
use crate::matchers::ReferenceDetector;
use crate::report::{write_report, Report, DEFAULT_REPORT_FILE};
use crate::scan::{
    collect_image_files, collect_source_files, to_owned_list, ExcludeSet, DEFAULT_IMAGE_DIRS,
    DEFAULT_IMAGE_EXTENSIONS, DEFAULT_SOURCE_DIRS, DEFAULT_SOURCE_EXTENSIONS,
};
use crate::DeadimgConfig;

/// Builder for configuring unused image analysis.
#[derive(Debug)]
pub struct Deadimg {
    /// Project root; all configured dirs are relative to it
    root: PathBuf,

    /// Directories scanned for images
    image_dirs: Vec<String>,

    /// Directories scanned for source files
    source_dirs: Vec<String>,

    /// Image extensions
    extensions: Vec<String>,

    /// Source extensions
    source_extensions: Vec<String>,

    /// Exclusion globs
    exclude: Vec<String>,

    /// Report file (relative to root unless absolute)
    output_file: PathBuf,

    /// Fail / delete policy
    disposition: Disposition,

    /// Detectors and read strategy
    index: ReferenceIndex,
}

impl Deadimg {
    /// Create a new analysis builder for the given project root with defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            image_dirs: to_owned_list(DEFAULT_IMAGE_DIRS),
            source_dirs: to_owned_list(DEFAULT_SOURCE_DIRS),
            extensions: to_owned_list(DEFAULT_IMAGE_EXTENSIONS),
            source_extensions: to_owned_list(DEFAULT_SOURCE_EXTENSIONS),
            exclude: Vec::new(),
            output_file: PathBuf::from(DEFAULT_REPORT_FILE),
            disposition: Disposition::default(),
            index: ReferenceIndex::new(),
        }
    }

    /// Builder seeded from a loaded deadimg.toml; unset keys keep defaults.
    pub fn from_config(root: impl Into<PathBuf>, config: &DeadimgConfig) -> Self {
        let mut builder = Self::new(root);
        if let Some(dirs) = &config.image_dirs {
            builder.image_dirs = dirs.clone();
        }
        if let Some(dirs) = &config.source_dirs {
            builder.source_dirs = dirs.clone();
        }
        if let Some(exts) = &config.extensions {
            builder.extensions = normalize_extensions(exts.iter().cloned());
        }
        if let Some(exts) = &config.source_extensions {
            builder.source_extensions = normalize_extensions(exts.iter().cloned());
        }
        if let Some(patterns) = &config.exclude {
            builder.exclude = patterns.clone();
        }
        if let Some(file) = &config.output_file {
            builder.output_file = PathBuf::from(file);
        }
        if let Some(fail) = config.fail_on_unused {
            builder.disposition.fail_on_unused = fail;
        }
        if let Some(delete) = config.delete_unused {
            builder.disposition.delete_unused = delete;
        }
        builder
    }

    /// Replace the image directories.
    pub fn image_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.image_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the source directories.
    pub fn source_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.source_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the image extensions. A leading dot is accepted and stripped.
    pub fn extensions(mut self, exts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = normalize_extensions(exts);
        self
    }

    /// Replace the source extensions. A leading dot is accepted and stripped.
    pub fn source_extensions(mut self, exts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.source_extensions = normalize_extensions(exts);
        self
    }

    /// Add exclusion globs.
    pub fn exclude(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Set the report file.
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    /// Fail the run after reporting when unused images exist.
    pub fn fail_on_unused(mut self, enabled: bool) -> Self {
        self.disposition.fail_on_unused = enabled;
        self
    }

    /// Delete unused images after reporting.
    pub fn delete_unused(mut self, enabled: bool) -> Self {
        self.disposition.delete_unused = enabled;
        self
    }

    /// Only print what would be deleted.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.disposition.dry_run = enabled;
        self
    }

    /// Read sources in parallel (default) or sequentially.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.index = self.index.parallel(enabled);
        self
    }

    /// Append a custom reference detector after the built-in ones.
    pub fn with_detector(mut self, detector: impl ReferenceDetector + 'static) -> Self {
        self.index = self.index.with_detector(detector);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    /// Absolute-or-root-relative path of the report file.
    pub fn report_path(&self) -> PathBuf {
        self.root.join(&self.output_file)
    }

    /// Run the analysis and return results. Touches nothing on disk.
    pub fn analyze(&self) -> DeadimgResult<AnalysisResult> {
        if self.extensions.is_empty() {
            return Err(DeadimgError::invalid_argument("no image extensions configured"));
        }

        // 1. Classify files
        let exclude = ExcludeSet::new(&self.exclude)?;
        let images =
            collect_image_files(&self.root, &self.image_dirs, &self.extensions, &exclude)
                .map_err(|e| scan_error(&self.root, e))?;
        let sources = collect_source_files(
            &self.root,
            &self.source_dirs,
            &self.source_extensions,
            &exclude,
        )
        .map_err(|e| scan_error(&self.root, e))?;

        // 2. Build the reference index
        let outcome = self.index.build_used_set(&sources, &images);

        // 3. Diff
        let unused = compute_unused(&images, &outcome.used);

        tracing::info!(
            root = %self.root.display(),
            images = images.len(),
            sources = sources.len(),
            unused = unused.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            root: self.root.clone(),
            images,
            sources,
            used: outcome.used,
            unused,
            unreadable_sources: outcome.unreadable,
        })
    }

    /// Analyze, write the report and delete if configured. Does not apply the
    /// fail-on-unused gate; see [`Deadimg::run`].
    pub fn execute(&self) -> DeadimgResult<RunOutcome> {
        let analysis = self.analyze()?;

        let report = Report::build(&self.root, &analysis.unused);
        write_report(&self.report_path(), &report)?;

        let deleted = if self.disposition.delete_unused {
            self.delete(&analysis.unused)
        } else {
            None
        };

        Ok(RunOutcome {
            analysis,
            report,
            report_path: self.report_path(),
            deleted,
        })
    }

    /// The full build-start step: [`Deadimg::execute`], then the gate.
    ///
    /// Returns [`DeadimgError::UnusedImages`] only after the report is on disk.
    pub fn run(&self) -> DeadimgResult<RunOutcome> {
        let outcome = self.execute()?;
        self.disposition.check(outcome.report.unused_count)?;
        Ok(outcome)
    }

    #[cfg(feature = "delete")]
    fn delete(&self, unused: &[PathBuf]) -> Option<DeleteResult> {
        Some(crate::dispose::delete_unused_images(
            unused,
            self.disposition.dry_run,
        ))
    }

    #[cfg(not(feature = "delete"))]
    fn delete(&self, _unused: &[PathBuf]) -> Option<DeleteResult> {
        tracing::warn!("delete_unused requested but the `delete` feature is disabled");
        None
    }
}

fn normalize_extensions(exts: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    exts.into_iter()
        .map(|e| {
            let e: String = e.into();
            e.trim_start_matches('.').to_string()
        })
        .filter(|e| !e.is_empty())
        .collect()
}

fn scan_error(root: &Path, err: anyhow::Error) -> DeadimgError {
    DeadimgError::Io {
        path: root.to_path_buf(),
        message: format!("{:#}", err),
        source: None,
    }
}

/// Result of running unused image analysis.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Root path that was analyzed
    pub root: PathBuf,

    /// Every discovered image, in discovery order
    pub images: Vec<PathBuf>,

    /// Every discovered source file
    pub sources: Vec<PathBuf>,

    /// Images referenced by at least one source
    pub used: UsedImageSet,

    /// Unused images, in discovery order
    pub unused: Vec<PathBuf>,

    /// Sources skipped because they could not be read
    pub unreadable_sources: Vec<PathBuf>,
}

impl AnalysisResult {
    pub fn has_unused(&self) -> bool {
        !self.unused.is_empty()
    }

    pub fn unused_count(&self) -> usize {
        self.unused.len()
    }

    /// Get percentage of unused images.
    pub fn unused_percentage(&self) -> f64 {
        if self.images.is_empty() {
            0.0
        } else {
            (self.unused.len() as f64 / self.images.len() as f64) * 100.0
        }
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub analysis: AnalysisResult,
    pub report: Report,
    /// Where the report was written
    pub report_path: PathBuf,
    /// Present when deletion was requested
    pub deleted: Option<DeleteResult>,
}

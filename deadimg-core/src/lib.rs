//! deadimg-core: unused image asset detection for front-end projects.
//!
//! Scans a project's image directories and source directories, decides which
//! images no source file references, reports them, and optionally deletes
//! them or fails the build.
//!
//! # Detection
//!
//! Detection is purely textual. For each (source, image) pair an ordered list
//! of [`matchers::ReferenceDetector`]s runs until one hits:
//!
//! - **Exact match**: file name or source-relative path, bare or quoted
//! - **Identifier containment**: the extension-stripped name inside any
//!   identifier-like run (case-insensitive, deliberately permissive)
//! - **Concatenation**: `+ 'name'` style string building
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use deadimg_core::prelude::*;
//!
//! let outcome = Deadimg::new("/path/to/project")
//!     .fail_on_unused(true)
//!     .run()?;
//!
//! for image in &outcome.report.unused_images {
//!     println!("Unused image: {}", image.path);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`scan`]: image / source discovery with exclusion globs
//! - [`matchers`]: reference detectors
//! - [`index`]: used-image set construction
//! - [`detect`]: unused = discovered − used
//! - [`report`]: JSON report and console output
//! - [`dispose`]: fail-on-unused gate and deletion
//! - [`builder`]: fluent builder API wiring the pipeline
//! - [`config`]: deadimg.toml loading
//! - [`error`]: typed error handling
//!
//! # Cargo Features
//!
//! - `delete` (default): enable deletion of unused images

pub mod builder;
pub mod common;
pub mod config;
pub mod detect;
pub mod dispose;
pub mod error;
pub mod index;
pub mod logging;
pub mod matchers;
pub mod prelude;
pub mod report;
pub mod scan;

// ============================================================================
// Explicit Re-exports
// ============================================================================

// Error types
pub use error::{DeadimgError, DeadimgResult, IoResultExt};

// Builder API
pub use builder::{AnalysisResult, Deadimg, RunOutcome};

// Configuration
pub use config::{load_config, load_config_file, DeadimgConfig, OutputConfig, CONFIG_FILE};

// Core detection
pub use detect::compute_unused;
pub use index::{build_used_set, read_source, IndexOutcome, ReferenceIndex, UsedImageSet};
pub use matchers::{
    concatenation_reference, contains_exact, default_detectors, identifier_containment,
    ConcatenationReference, ExactMatch, IdentifierContainment, ImageTarget, ReferenceDetector,
    ReferencePattern,
};

// Path helpers
pub use common::{display_path, normalize_path_string, path_to_normalized_string, relative_path};

// Logging
pub use logging::init_structured_logging;

// Reporting
pub use report::{
    print_json, print_plain, read_report, unused_image_info, write_report, Report,
    UnusedImageInfo, DEFAULT_REPORT_FILE, UNKNOWN,
};

// File scanning
pub use scan::{
    collect_files, collect_image_files, collect_source_files, ExcludeSet, DEFAULT_IMAGE_DIRS,
    DEFAULT_IMAGE_EXTENSIONS, DEFAULT_SOURCE_DIRS, DEFAULT_SOURCE_EXTENSIONS,
};

// Disposition
pub use dispose::{DeleteResult, Disposition};

#[cfg(feature = "delete")]
pub use dispose::{delete_unused_images, remove_file};

#[cfg(test)]
mod tests;

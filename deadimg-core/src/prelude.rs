//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use deadimg_core::prelude::*;
//! ```

// Errors
pub use crate::error::{DeadimgError, DeadimgResult};

// Builder API
pub use crate::builder::{AnalysisResult, Deadimg, RunOutcome};

// Core detection
pub use crate::detect::compute_unused;
pub use crate::index::{build_used_set, ReferenceIndex, UsedImageSet};
pub use crate::matchers::{ImageTarget, ReferenceDetector, ReferencePattern};

// File scanning
pub use crate::scan::{collect_image_files, collect_source_files, ExcludeSet};

// Configuration
pub use crate::config::{load_config, DeadimgConfig};

// Reporting and disposition
pub use crate::dispose::{DeleteResult, Disposition};
pub use crate::report::{write_report, Report, UnusedImageInfo};

//! Configuration loading from deadimg.toml.
//!
//! Every key is optional; unset keys fall back to the defaults in
//! [`crate::scan`] and [`crate::report`]. Command-line flags override the file.
//!
//! ```toml
//! image_dirs = ["src/assets", "public"]
//! source_dirs = ["src"]
//! extensions = ["png", "svg"]
//! exclude = ["**/test-assets/**"]
//! output_file = "reports/unused-images.json"
//! fail_on_unused = true
//!
//! [output]
//! format = "json"
//! ```

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{DeadimgError, DeadimgResult};

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE: &str = "deadimg.toml";

/// Main configuration structure for deadimg.toml.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DeadimgConfig {
    /// Directories scanned for images
    pub image_dirs: Option<Vec<String>>,
    /// Directories scanned for source files
    pub source_dirs: Option<Vec<String>>,
    /// Image file extensions (without the dot)
    pub extensions: Option<Vec<String>>,
    /// Source file extensions (without the dot)
    pub source_extensions: Option<Vec<String>>,
    /// Glob patterns excluded from both scans
    pub exclude: Option<Vec<String>>,
    /// Report file path, relative to the project root
    pub output_file: Option<String>,
    /// Fail the build when unused images are found
    pub fail_on_unused: Option<bool>,
    /// Delete unused images
    pub delete_unused: Option<bool>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Console output formats accepted in `[output] format`.
pub const OUTPUT_FORMATS: &[&str] = &["plain", "json"];

/// Output format configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

impl DeadimgConfig {
    /// Rejects values the TOML schema alone cannot catch.
    pub fn validate(&self, path: &Path) -> DeadimgResult<()> {
        if let Some(format) = self.output.as_ref().and_then(|o| o.format.as_deref()) {
            if !OUTPUT_FORMATS.iter().any(|f| f.eq_ignore_ascii_case(format)) {
                return Err(DeadimgError::config(
                    path,
                    format!(
                        "invalid output format '{}', expected one of: {}",
                        format,
                        OUTPUT_FORMATS.join(", ")
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Whether console output should be JSON.
    pub fn wants_json(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Loads configuration from deadimg.toml in `root` if it exists.
pub fn load_config(root: &Path) -> DeadimgResult<Option<DeadimgConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

/// Loads configuration from an explicit file.
pub fn load_config_file(path: &Path) -> DeadimgResult<DeadimgConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| DeadimgError::config(path, format!("failed to read: {}", e)))?;
    let cfg: DeadimgConfig = toml::from_str(&content)
        .map_err(|e| DeadimgError::config(path, format!("invalid TOML: {}", e)))?;
    cfg.validate(path)?;
    tracing::debug!(config = %path.display(), "configuration loaded");
    Ok(cfg)
}

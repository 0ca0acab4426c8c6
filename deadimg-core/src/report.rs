//! Report generation - JSON report file plus plaintext / JSON console output.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::common::display_path;
use crate::error::{DeadimgError, DeadimgResult, IoResultExt};

/// Placeholder for size / modification time that could not be read.
pub const UNKNOWN: &str = "unknown";

/// Default report file name, relative to the project root.
pub const DEFAULT_REPORT_FILE: &str = "unused-images.json";

/// Snapshot of one unused image at report time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedImageInfo {
    /// Root-relative path with forward slashes
    pub path: String,
    /// Size rounded to whole KiB, e.g. `"12 KB"`
    pub size: String,
    /// Modification date (UTC), e.g. `"2025-03-14"`
    pub last_modified: String,
}

/// The persisted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub timestamp: String,
    pub unused_count: usize,
    pub unused_images: Vec<UnusedImageInfo>,
}

impl Report {
    /// Build a report for `unused` (already in discovery order), stamped now.
    pub fn build(root: &Path, unused: &[PathBuf]) -> Self {
        Self::build_at(Utc::now(), root, unused)
    }

    /// Build a report with an explicit timestamp.
    pub fn build_at(now: DateTime<Utc>, root: &Path, unused: &[PathBuf]) -> Self {
        let unused_images: Vec<UnusedImageInfo> = unused
            .iter()
            .map(|p| unused_image_info(root, p))
            .collect();
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            unused_count: unused_images.len(),
            unused_images,
        }
    }
}

/// Collect size and modification date for an image, substituting
/// [`UNKNOWN`] if the file can no longer be inspected.
pub fn unused_image_info(root: &Path, path: &Path) -> UnusedImageInfo {
    let metadata = fs::metadata(path).ok();
    UnusedImageInfo {
        path: display_path(root, path),
        size: metadata
            .as_ref()
            .map(|m| format_size(m.len()))
            .unwrap_or_else(|| UNKNOWN.to_string()),
        last_modified: metadata
            .and_then(|m| m.modified().ok())
            .map(format_date)
            .unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

/// `bytes` rounded to the nearest KiB.
pub fn format_size(bytes: u64) -> String {
    let kb = (bytes as f64 / 1024.0).round() as u64;
    format!("{} KB", kb)
}

/// UTC calendar date of a timestamp.
pub fn format_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format("%Y-%m-%d").to_string()
}

/// Write the report as pretty JSON, replacing any previous report.
pub fn write_report(path: &Path, report: &Report) -> DeadimgResult<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| DeadimgError::report(path, e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(path, json).with_path(path)?;
    tracing::info!(report = %path.display(), unused = report.unused_count, "report written");
    Ok(())
}

/// Read a previously written report.
pub fn read_report(path: &Path) -> DeadimgResult<Report> {
    let content = fs::read_to_string(path).with_path(path)?;
    serde_json::from_str(&content).map_err(|e| DeadimgError::report(path, e.to_string()))
}

/// Prints the report summary in plain text format.
pub fn print_plain(report: &Report, report_file: &Path) {
    println!("Scan complete.");
    println!("Found {} unused image(s).", report.unused_count);
    println!("Report saved: {}", report_file.display());

    if !report.unused_images.is_empty() {
        println!();
        println!("UNUSED IMAGES ({}):", report.unused_count);
        for info in &report.unused_images {
            println!("- {}  {}  {}", info.path, info.size, info.last_modified);
        }
    }
}

/// Prints the report in JSON format.
///
/// Falls back to a bare list of paths if serialization fails.
pub fn print_json(report: &Report) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::warn!(error = %e, "JSON serialization failed");
            let paths: Vec<&str> = report.unused_images.iter().map(|i| i.path.as_str()).collect();
            println!("{{\"unusedImages\": {:?}}}", paths);
        }
    }
}

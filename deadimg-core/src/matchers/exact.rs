//! Exact textual containment.

use super::{ReferenceDetector, ReferencePattern};

/// Literal candidates for an image: the bare file name, the relative path,
/// and their quoted forms.
pub fn exact_candidates(file_name: &str, relative: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(7);
    if !file_name.is_empty() {
        out.push(file_name.to_string());
        out.push(format!("'{}'", file_name));
        out.push(format!("\"{}\"", file_name));
    }
    if !relative.is_empty() {
        out.push(relative.to_string());
        out.push(format!("'{}'", relative));
        out.push(format!("\"{}\"", relative));
        out.push(format!("`{}`", relative));
    }
    out
}

/// Whether `source` literally contains any exact candidate.
pub fn contains_exact(source: &str, file_name: &str, relative: &str) -> bool {
    exact_candidates(file_name, relative)
        .iter()
        .any(|candidate| source.contains(candidate.as_str()))
}

/// Exact file-name / relative-path containment.
///
/// Two images that share a file name in different directories are both
/// marked used by a single bare `name.png` reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl ReferenceDetector for ExactMatch {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn detects(&self, source: &str, pattern: &ReferencePattern<'_>) -> bool {
        contains_exact(source, pattern.file_name(), &pattern.relative)
    }
}

//! Heuristic dynamic-reference detection.
//!
//! Meant to catch paths assembled at runtime (`base + 'name' + ext`,
//! `` `${dir}/${name}.png` ``) at the cost of precision. Both patterns are
//! case-insensitive and built from the image's extension-stripped stem.
//!
//! Known precision tradeoff: identifier containment is permissive. A stem
//! that is a substring of any identifier or word (`logo` in
//! `logoSmallButton`, `a` in almost anything) marks the image used.
//!
//! Stems are inserted as literal text (`regex::escape`), so a `.` inside a
//! stem only matches a dot: `hero.banner.png` is not marked used by
//! `hero-banner`.

use regex::Regex;

use super::{ReferenceDetector, ReferencePattern};

/// Compiled heuristic regexes for one stem.
#[derive(Debug, Clone)]
pub struct StemPatterns {
    pub identifier: Regex,
    pub concatenation: Regex,
}

impl StemPatterns {
    pub fn compile(stem: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(stem);
        Ok(Self {
            identifier: Regex::new(&format!(r"(?i)[\w\d_]*{}[\w\d_]*", escaped))?,
            concatenation: Regex::new(&format!(r#"(?i)\+\s*['"`]?{}['"`]?"#, escaped))?,
        })
    }
}

/// The stem appears as (part of) an identifier-like run anywhere in `source`.
pub fn identifier_containment(source: &str, stem: &str) -> bool {
    StemPatterns::compile(stem).is_ok_and(|p| p.identifier.is_match(source))
}

/// `source` contains `+` followed by the stem, optionally quoted.
pub fn concatenation_reference(source: &str, stem: &str) -> bool {
    StemPatterns::compile(stem).is_ok_and(|p| p.concatenation.is_match(source))
}

/// Identifier-containment heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierContainment;

impl ReferenceDetector for IdentifierContainment {
    fn name(&self) -> &'static str {
        "identifier"
    }

    fn detects(&self, source: &str, pattern: &ReferencePattern<'_>) -> bool {
        pattern
            .target
            .stem_patterns()
            .is_some_and(|p| p.identifier.is_match(source))
    }
}

/// Concatenation-reference heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatenationReference;

impl ReferenceDetector for ConcatenationReference {
    fn name(&self) -> &'static str {
        "concatenation"
    }

    fn detects(&self, source: &str, pattern: &ReferencePattern<'_>) -> bool {
        pattern
            .target
            .stem_patterns()
            .is_some_and(|p| p.concatenation.is_match(source))
    }
}

//! Common utilities shared across the scanner, matchers and reporter.

mod path;

pub use path::{display_path, normalize_path_string, path_to_normalized_string, relative_path};

//! Unused image detection: discovered images minus the used set.

use std::path::PathBuf;

use crate::index::UsedImageSet;

/// Images present in `all` but absent from `used`, in discovery order.
pub fn compute_unused(all: &[PathBuf], used: &UsedImageSet) -> Vec<PathBuf> {
    all.iter()
        .filter(|image| !used.contains(image))
        .cloned()
        .collect()
}

//! Platform-independent path helpers.
//!
//! Source code embeds forward-slash paths no matter which OS the build runs
//! on, so every path that is compared against source text goes through these
//! helpers first.

use std::path::{Component, Path, PathBuf};

/// Normalize a path string to use forward slashes.
#[inline]
pub fn normalize_path_string(path: &str) -> String {
    path.replace('\\', "/")
}

/// Convert a Path to a normalized string (forward slashes).
#[inline]
pub fn path_to_normalized_string(path: &Path) -> String {
    normalize_path_string(&path.display().to_string())
}

/// Directory-relative path from `from_dir` to `to`, joined with `/`.
///
/// Purely lexical: no symlink resolution, no file system access beyond
/// reading the working directory when exactly one side is absolute.
/// Matches the usual `relative(dirname(source), image)` semantics, e.g.
/// `relative_path("src/pages", "src/assets/a.png") == "../assets/a.png"`.
pub fn relative_path(from_dir: &Path, to: &Path) -> String {
    let (from_dir, to) = anchor_pair(from_dir, to);
    let from = lexical_components(&from_dir);
    let to = lexical_components(&to);

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::with_capacity(from.len() - common + to.len() - common);
    parts.extend((common..from.len()).map(|_| "..".to_string()));
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    normalize_path_string(&parts.join("/"))
}

/// Path relative to the project root with forward slashes, for reports.
///
/// Falls back to the full normalized path when `path` lies outside `root`.
pub fn display_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => path_to_normalized_string(rel),
        _ => path_to_normalized_string(path),
    }
}

/// Make both paths comparable: if exactly one is absolute, anchor the other
/// at the current working directory.
fn anchor_pair(a: &Path, b: &Path) -> (PathBuf, PathBuf) {
    if a.is_absolute() == b.is_absolute() {
        return (a.to_path_buf(), b.to_path_buf());
    }
    let cwd = std::env::current_dir().unwrap_or_default();
    let anchor = |p: &Path| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            cwd.join(p)
        }
    };
    (anchor(a), anchor(b))
}

/// Components with `.` dropped and `..` folded into the preceding segment.
fn lexical_components(path: &Path) -> Vec<Component<'_>> {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

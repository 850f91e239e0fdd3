//! Archive path normalization.
//!
//! Entry names stored in tar archives are slash-separated and frequently
//! carry redundant decoration (`./`, doubled or trailing slashes). Every
//! path accepted or compared by this crate is first reduced to its ordered
//! list of non-empty segments, so `a/b/c`, `./a/b/c` and `/a/b/c/` all name
//! the same node. `..` is not resolved; it stays a literal segment.

/// Splits a path into its normalized segments, dropping empty and `.`
/// components. `""`, `"/"` and `"."` all yield no segments (the root).
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

/// Canonical form of a path: its segments joined by `/`, with no leading
/// or trailing slash. The root canonicalizes to the empty string.
pub fn clean_path(path: &str) -> String {
    split_path(path).join("/")
}

/// Joins path elements into one canonical path, applying the same
/// normalization as [`split_path`]. Purely lexical, no filesystem access.
pub fn join(elems: &[&str]) -> String {
    clean_path(&elems.join("/"))
}

//! Single-pass archive indexing.
//!
//! One linear pass over the entry stream produces a rooted tree keyed by
//! path segment. Intermediate components that never appear as their own
//! archive entry become synthetic directory nodes, so any path listed in
//! the archive is reachable segment by segment afterwards. Lookups descend
//! the tree and cost one child-map probe per segment, independent of the
//! archive's size.

use std::io::Read;

use crate::error::{Error, Result};
use crate::node::{EntryInfo, Node};
use crate::path::split_path;

/// The index tree built from one full pass over an archive's entries.
/// Immutable once built.
#[derive(Debug)]
pub struct Index {
    root: Node,
}

impl Index {
    /// Consumes every entry of `archive` and builds the tree. A decode
    /// error mid-stream aborts the build; no partial index is returned.
    pub fn from_archive<R: Read>(archive: &mut tar::Archive<R>) -> Result<Index> {
        let mut root = Node::synthetic_dir("/");
        for entry in archive.entries()? {
            let entry = entry?;
            let raw_path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            insert(&mut root, &raw_path, entry.header())?;
        }
        Ok(Index { root })
    }

    /// The synthetic root directory node, named `/`.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Resolves a path to its node, descending one child per segment.
    pub fn find(&self, path: &str) -> Result<&Node> {
        let mut cursor = &self.root;
        for part in split_path(path) {
            cursor = cursor.children.get(part).ok_or(Error::NotFound)?;
        }
        Ok(cursor)
    }
}

fn insert(root: &mut Node, raw_path: &str, header: &tar::Header) -> Result<()> {
    let parts = split_path(raw_path);
    // An explicit entry for the root itself never replaces the synthetic root.
    let Some((last, parents)) = parts.split_last() else {
        return Ok(());
    };

    let mut cursor = root;
    for part in parents {
        cursor = cursor
            .children
            .entry((*part).to_string())
            .or_insert_with(|| Node::synthetic_dir(part));
    }

    let info = EntryInfo::from_header(last, header)?;
    match cursor.children.get_mut(*last) {
        // Duplicate paths are legal (update records, re-listed directories);
        // the last entry wins. A directory entry keeps children already
        // accumulated under that name, so `a/` listed after `a/b` does not
        // orphan `a/b`.
        Some(existing) if info.is_dir => {
            existing.metadata = crate::node::Metadata::Entry(info);
        }
        _ => {
            cursor.children.insert((*last).to_string(), Node::from_entry(info));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn file_header(path: &str, size: u64) -> tar::Header {
        let mut header = tar::Header::new_gnu();
        header.set_path(path).unwrap();
        header.set_size(size);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        header
    }

    fn dir_header(path: &str) -> tar::Header {
        let mut header = tar::Header::new_gnu();
        header.set_path(path).unwrap();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        header
    }

    fn build_index(entries: &[(&str, &[u8], bool)]) -> Index {
        let mut builder = tar::Builder::new(Vec::new());
        for (path, data, is_dir) in entries {
            if *is_dir {
                builder.append(&dir_header(path), std::io::empty()).unwrap();
            } else {
                builder
                    .append(&file_header(path, data.len() as u64), *data)
                    .unwrap();
            }
        }
        let bytes = builder.into_inner().unwrap();
        let mut archive = tar::Archive::new(Cursor::new(bytes));
        Index::from_archive(&mut archive).unwrap()
    }

    #[test]
    fn test_synthesizes_intermediate_directories() {
        let index = build_index(&[
            ("a/b/c/d", b"hello\n", false),
            ("a/b/c/e", b"hello\n", false),
        ]);

        for path in ["a", "a/b", "a/b/c"] {
            let node = index.find(path).unwrap();
            assert!(node.is_dir(), "{path} should be a directory");
        }
        assert!(!index.find("a/b/c/d").unwrap().is_dir());
        assert!(!index.find("a/b/c/e").unwrap().is_dir());
    }

    #[test]
    fn test_find_missing_is_not_found() {
        let index = build_index(&[("a/b", b"x", false)]);
        assert!(matches!(index.find("a/c"), Err(Error::NotFound)));
        assert!(matches!(index.find("z"), Err(Error::NotFound)));
        assert!(matches!(index.find("a/b/deeper"), Err(Error::NotFound)));
    }

    #[test]
    fn test_root_resolves_to_synthetic_root() {
        let index = build_index(&[("a", b"x", false)]);
        let root = index.find("/").unwrap();
        assert!(root.is_dir());
        assert_eq!(root.metadata.name(), "/");
    }

    #[test]
    fn test_normalized_paths_reach_same_node() {
        let index = build_index(&[("./a/b/", &[], true), ("a/b/c", b"x", false)]);
        let plain = index.find("a/b/c").unwrap();
        let dotted = index.find("./a/b/c").unwrap();
        let rooted = index.find("/a/b/c").unwrap();
        assert_eq!(plain.metadata, dotted.metadata);
        assert_eq!(plain.metadata, rooted.metadata);
    }

    #[test]
    fn test_explicit_directory_entry_metadata_wins() {
        let index = build_index(&[("a/b", b"x", false), ("a/", &[], true)]);
        let a = index.find("a").unwrap();
        assert!(a.is_dir());
        assert_eq!(a.metadata.mode(), 0o755);
        // the child indexed before the directory entry survives
        assert!(index.find("a/b").is_ok());
    }

    #[test]
    fn test_duplicate_file_entry_last_wins() {
        let index = build_index(&[("a/b", b"first", false), ("a/b", b"second!", false)]);
        let node = index.find("a/b").unwrap();
        assert_eq!(node.metadata.size(), 7);
    }

    #[test]
    fn test_empty_directory_entry_is_valid() {
        let index = build_index(&[("empty/", &[], true)]);
        let node = index.find("empty").unwrap();
        assert!(node.is_dir());
        assert!(node.children.is_empty());
    }
}

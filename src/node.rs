//! Tree nodes and entry metadata.
//!
//! The index is a strict tree of [`Node`]s, one per path segment. A node
//! either mirrors an explicit archive entry or is a synthetic directory
//! fabricated for an intermediate path component the archive never listed
//! on its own. [`Metadata`] keeps the two cases apart as a tagged variant
//! while exposing the same read-only accessors for both.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::Result;

/// Metadata taken from an explicit archive entry header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Final path segment of the entry, as stored in the archive.
    pub name: String,
    pub size: u64,
    pub mode: u32,
    /// Modification time, seconds since the Unix epoch.
    pub mtime: u64,
    pub is_dir: bool,
}

impl EntryInfo {
    /// Reads the metadata fields of a tar header. `name` is the entry's
    /// final normalized path segment; the header's own name field may carry
    /// `./` prefixes or trailing slashes and is not used here.
    pub fn from_header(name: &str, header: &tar::Header) -> Result<EntryInfo> {
        Ok(EntryInfo {
            name: name.to_string(),
            size: header.size()?,
            mode: header.mode()?,
            mtime: header.mtime()?,
            is_dir: header.entry_type().is_dir(),
        })
    }
}

/// Metadata of one tree node: either carried over from an archive entry or
/// fabricated for a directory the archive only implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metadata {
    Entry(EntryInfo),
    SyntheticDir(String),
}

impl Metadata {
    pub fn name(&self) -> &str {
        match *self {
            Metadata::Entry(ref info) => &info.name,
            Metadata::SyntheticDir(ref name) => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        match *self {
            Metadata::Entry(ref info) => info.is_dir,
            Metadata::SyntheticDir(_) => true,
        }
    }

    /// Payload size in bytes; zero for directories, synthetic or not.
    pub fn size(&self) -> u64 {
        match *self {
            Metadata::Entry(ref info) => info.size,
            Metadata::SyntheticDir(_) => 0,
        }
    }

    /// Unix permission bits; zero for synthetic directories.
    pub fn mode(&self) -> u32 {
        match *self {
            Metadata::Entry(ref info) => info.mode,
            Metadata::SyntheticDir(_) => 0,
        }
    }

    /// Modification time, or `None` when the archive recorded none
    /// (synthetic directories and zero mtimes).
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        match *self {
            Metadata::Entry(ref info) if info.mtime > 0 => {
                DateTime::from_timestamp(info.mtime as i64, 0)
            }
            _ => None,
        }
    }
}

/// One vertex of the index tree. Children are keyed by segment name;
/// storage order is arbitrary, listings sort at enumeration time.
#[derive(Debug, Clone)]
pub struct Node {
    pub metadata: Metadata,
    pub children: HashMap<String, Node>,
}

impl Node {
    pub fn from_entry(info: EntryInfo) -> Node {
        Node {
            metadata: Metadata::Entry(info),
            children: HashMap::new(),
        }
    }

    pub fn synthetic_dir(name: &str) -> Node {
        Node {
            metadata: Metadata::SyntheticDir(name.to_string()),
            children: HashMap::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }
}

//! The filesystem facade.
//!
//! [`TarFs`] is the public face of the crate: a read-only, path-addressed
//! view over one archive. Stat and directory listings are answered from
//! the index built at construction time; opening an entry for reading
//! re-issues a fresh decoded pass over the archive, because the entry
//! stream is forward-only and the index holds no payload offsets.
//!
//! The [`FileSystem`] trait is the four-operation contract a generic
//! recursive walker needs (`stat`, `read_dir`, `open`, `join`); `TarFs`
//! implements it, and so can any synthetic in-memory filesystem.

use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::index::Index;
use crate::node::Metadata;
use crate::path::{clean_path, join};
use crate::source::{ArchiveSource, FileSource};

/// The pluggable-filesystem contract: just enough surface for a recursive
/// walker to traverse a tree from an arbitrary starting path.
pub trait FileSystem {
    /// Metadata of the entry at `path`.
    fn stat(&self, path: &str) -> Result<Metadata>;
    /// Direct children of the directory at `path`, ascending by name.
    fn read_dir(&self, path: &str) -> Result<Vec<Metadata>>;
    /// A reader over the payload bytes of the regular file at `path`.
    fn open(&self, path: &str) -> Result<EntryReader<'_>>;
    /// Lexical path concatenation, same normalization as lookups.
    fn join(&self, elems: &[&str]) -> String;
}

/// Streaming reader over one entry's payload. Bounded to exactly the
/// entry's declared size; reading past the end yields `Ok(0)`. Owns its
/// decoder and byte-stream handles, released on drop.
pub struct EntryReader<'a> {
    inner: io::Take<Box<dyn Read + 'a>>,
}

impl<'a> EntryReader<'a> {
    /// Wraps a decoded stream positioned at the payload's first byte,
    /// capped at `size` bytes.
    pub fn new(reader: Box<dyn Read + 'a>, size: u64) -> EntryReader<'a> {
        EntryReader {
            inner: reader.take(size),
        }
    }
}

impl Read for EntryReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

/// A read-only filesystem over a tar or tar.gz archive.
///
/// Construction indexes the whole archive in one pass; the index is
/// immutable afterwards. All handles are released on drop.
///
/// ```no_run
/// use std::io::Read;
///
/// let fs = tarfs::TarFs::open_path("root.tar.gz")?;
/// for child in fs.read_dir("/")? {
///     println!("{} dir={}", child.name(), child.is_dir());
/// }
/// let mut payload = String::new();
/// fs.open("a/b/c/d")?.read_to_string(&mut payload)?;
/// # Ok::<(), tarfs::Error>(())
/// ```
pub struct TarFs<S: ArchiveSource> {
    index: Index,
    source: S,
}

impl TarFs<FileSource> {
    /// Opens an archive by filesystem path. Gzip compression is
    /// auto-detected.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<TarFs<FileSource>> {
        TarFs::new(FileSource::new(path))
    }
}

impl<S: ArchiveSource> TarFs<S> {
    /// Builds the filesystem from any reopenable archive source. This is
    /// the primitive constructor; [`TarFs::open_path`] layers on top of it.
    pub fn new(source: S) -> Result<TarFs<S>> {
        let index = {
            let mut archive = tar::Archive::new(source.reopen()?);
            Index::from_archive(&mut archive)?
        };
        Ok(TarFs { index, source })
    }

    /// Returns the metadata of the entry at `path`. The root (`""`, `"/"`,
    /// `"."`) reports itself as a directory named `/`.
    pub fn stat(&self, path: &str) -> Result<Metadata> {
        Ok(self.index.find(path)?.metadata.clone())
    }

    /// Lists the direct children of the directory at `path`, sorted
    /// ascending by name.
    pub fn read_dir(&self, path: &str) -> Result<Vec<Metadata>> {
        let node = self.index.find(path)?;
        if !node.is_dir() {
            return Err(Error::InvalidOperation);
        }
        let mut listing: Vec<Metadata> = node
            .children
            .values()
            .map(|child| child.metadata.clone())
            .collect();
        listing.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(listing)
    }

    /// Opens the regular file at `path` for reading.
    ///
    /// Each call scans the entry stream from the beginning — cost is
    /// proportional to the number of archive entries — and hands back a
    /// reader with its own private decoder stack, so concurrent opens on
    /// one facade never share a stream position.
    pub fn open(&self, path: &str) -> Result<EntryReader<'_>> {
        let target = clean_path(path);
        // the root cannot be opened for reading
        if target.is_empty() {
            return Err(Error::InvalidOperation);
        }

        let (offset, size) = self.locate(&target)?;

        // A second pass positions a fresh stream at the payload itself.
        let mut reader = self.source.reopen()?;
        io::copy(&mut reader.by_ref().take(offset), &mut io::sink())?;
        Ok(EntryReader::new(reader, size))
    }

    /// Reads the whole payload of the regular file at `path`.
    pub fn read(&self, path: &str) -> Result<Vec<u8>> {
        let mut reader = self.open(path)?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Joins path elements lexically, with the same normalization applied
    /// to every lookup path.
    pub fn join(&self, elems: &[&str]) -> String {
        join(elems)
    }

    /// Scans entries in archive order for the first one matching `target`
    /// (already normalized), returning the payload's byte offset in the
    /// decoded stream and its size.
    fn locate(&self, target: &str) -> Result<(u64, u64)> {
        let mut archive = tar::Archive::new(self.source.reopen()?);
        for entry in archive.entries()? {
            let entry = entry?;
            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            if clean_path(&name) == target {
                if entry.header().entry_type().is_dir() {
                    return Err(Error::InvalidOperation);
                }
                return Ok((entry.raw_file_position(), entry.size()));
            }
        }
        Err(Error::NotFound)
    }
}

impl<S: ArchiveSource> FileSystem for TarFs<S> {
    fn stat(&self, path: &str) -> Result<Metadata> {
        TarFs::stat(self, path)
    }

    fn read_dir(&self, path: &str) -> Result<Vec<Metadata>> {
        TarFs::read_dir(self, path)
    }

    fn open(&self, path: &str) -> Result<EntryReader<'_>> {
        TarFs::open(self, path)
    }

    fn join(&self, elems: &[&str]) -> String {
        TarFs::join(self, elems)
    }
}

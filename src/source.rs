//! Archive byte sources.
//!
//! Stat and list queries are answered from the index alone, but payload
//! reads need to walk the entry stream again from the very beginning: the
//! decoded stream is forward-only, so rewinding means reopening. An
//! [`ArchiveSource`] is anything that can hand out a fresh decoded pass
//! over the same archive bytes on demand.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::Result;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Capability to re-issue a fresh pass over the raw tar byte stream,
/// decompressed if the archive is gzipped. Every call yields an
/// independent reader positioned at the start of the archive.
pub trait ArchiveSource {
    fn reopen(&self) -> Result<Box<dyn Read + '_>>;
}

/// An archive on the local filesystem, plain tar or tar.gz. The format is
/// sniffed from the gzip magic bytes on every reopen, with the file handle
/// rewound before wrapping.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> FileSource {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ArchiveSource for FileSource {
    fn reopen(&self) -> Result<Box<dyn Read + '_>> {
        let mut file = File::open(&self.path)?;
        if sniff_gzip(&mut file)? {
            Ok(Box::new(GzDecoder::new(file)))
        } else {
            Ok(Box::new(file))
        }
    }
}

/// An archive held in memory, for embedding in a larger pipeline. Each
/// reopen borrows the buffer, no copy.
impl ArchiveSource for Vec<u8> {
    fn reopen(&self) -> Result<Box<dyn Read + '_>> {
        if self.starts_with(&GZIP_MAGIC) {
            Ok(Box::new(GzDecoder::new(self.as_slice())))
        } else {
            Ok(Box::new(self.as_slice()))
        }
    }
}

fn sniff_gzip<R: Read + Seek>(reader: &mut R) -> Result<bool> {
    let mut magic = [0u8; 2];
    let mut filled = 0;
    while filled < magic.len() {
        let n = reader.read(&mut magic[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    reader.seek(SeekFrom::Start(0))?;
    Ok(filled == magic.len() && magic == GZIP_MAGIC)
}

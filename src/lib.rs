//! tarfs
//! -----
//!
//! A read-only, hierarchical filesystem view over the contents of a tar
//! archive, plain or gzip-compressed.
//!
//! Opening an archive indexes its entry stream once into an in-memory tree
//! keyed by path segment, synthesizing directory nodes for intermediate
//! components the archive never lists explicitly. After that, `stat` and
//! `read_dir` answer in time proportional to path depth, not archive size.
//! Payload reads re-scan the forward-only entry stream from the start,
//! since the tar format offers no per-record seeking.
//!
//! ```no_run
//! use std::io::Read;
//!
//! let fs = tarfs::TarFs::open_path("backup.tar.gz")?;
//!
//! let meta = fs.stat("etc/hosts")?;
//! println!("{} ({} bytes)", meta.name(), meta.size());
//!
//! for child in fs.read_dir("etc")? {
//!     println!("  {}", child.name());
//! }
//!
//! let mut hosts = String::new();
//! fs.open("etc/hosts")?.read_to_string(&mut hosts)?;
//! # Ok::<(), tarfs::Error>(())
//! ```
//!
//! Archive-entry decoding is delegated to the `tar` crate and gzip
//! decompression to `flate2`; this crate owns the indexing, lookup and
//! payload-streaming logic on top of them.

pub mod error;
pub mod filesystem;
pub mod index;
pub mod node;
pub mod path;
pub mod source;

pub use crate::error::{Error, Result};
pub use crate::filesystem::{EntryReader, FileSystem, TarFs};
pub use crate::index::Index;
pub use crate::node::{EntryInfo, Metadata, Node};
pub use crate::source::{ArchiveSource, FileSource};

//! Per-file extent resolution: path → (physical address, inode) sort key.

use std::fs::File;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use physmap::ExtentReader;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

/// Why a file could not be resolved. Either variant aborts the whole run;
/// there is deliberately no per-file recovery or retry.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot open {path}: {source}", path = .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read extent map of {path}: {source}", path = .path.display())]
    Query {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    /// The path that failed to resolve.
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Query { path, .. } => path,
        }
    }
}

/// Composite sort key for one file.
///
/// Derived `Ord` compares fields in declaration order: physical address
/// first, inode second. Files with no allocated extents keep `physical` at
/// zero, which sorts them ahead of every file with a real address (and by
/// inode among themselves). A genuine extent at device offset zero is
/// indistinguishable from the sentinel; the inode tie-break keeps the order
/// deterministic regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    /// Device byte offset of the file's first extent, or 0.
    pub physical: u64,
    /// Inode number of the underlying storage object.
    pub inode: u64,
}

/// Resolve one path to its sort key.
///
/// The file is opened, queried, and closed within this call; no handle
/// outlives it, on success or error. The inode comes from the open handle
/// rather than the path, so hard links and concurrent renames are keyed by
/// the storage object itself.
///
/// A query failure is distinct from a legitimately empty extent map: only
/// the latter produces the zero sentinel, the former is a [`ResolveError::Query`].
pub fn resolve_path(path: &Path, reader: &mut ExtentReader) -> Result<SortKey, ResolveError> {
    let open_err = |source| ResolveError::Open {
        path: path.to_owned(),
        source,
    };

    let file = File::open(path).map_err(open_err)?;
    let metadata = file.metadata().map_err(open_err)?;

    if !metadata.is_file() {
        let kind = if metadata.is_dir() {
            io::ErrorKind::IsADirectory
        } else {
            io::ErrorKind::InvalidInput
        };
        return Err(open_err(io::Error::new(kind, "not a regular file")));
    }

    let inode = metadata.ino();

    let extents = reader.read_extents(&file).map_err(|source| ResolveError::Query {
        path: path.to_owned(),
        source,
    })?;

    let physical = extents.first().map(|e| e.physical).unwrap_or(0);
    debug!(path = %path.display(), physical, inode, extents = extents.len(), "resolved");

    Ok(SortKey { physical, inode })
}

/// Resolve every path, in parallel, preserving input positions.
///
/// Each rayon worker carries its own [`ExtentReader`] so the kernel result
/// buffer is reused across the files that worker handles. Results are
/// collected back into input order before the error check, so the reported
/// failure is always the first failing path as the user listed them.
pub fn resolve_all(paths: &[PathBuf]) -> Result<Vec<SortKey>, ResolveError> {
    let results: Vec<Result<SortKey, ResolveError>> = paths
        .par_iter()
        .map_init(ExtentReader::new, |reader, path| resolve_path(path, reader))
        .collect();

    results.into_iter().collect()
}

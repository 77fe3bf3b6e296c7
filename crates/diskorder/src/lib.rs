//! diskorder - print files sorted by physical disk order
//!
//! Given a batch of file paths, this library figures out where each file's
//! data starts on the block device and permutes the list into that physical
//! order, so callers can process the batch with sequential access instead of
//! seeking all over a rotational disk.

pub mod input;
pub mod order;
pub mod resolve;

pub use input::collect_paths;
pub use order::sort_by_location;
pub use resolve::{ResolveError, SortKey, resolve_all, resolve_path};

use std::path::PathBuf;

/// Run the whole pipeline on an already-collected path list.
///
/// Resolution is all-or-nothing: the first unresolvable file aborts the
/// batch and no partial ordering is produced.
pub fn order_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ResolveError> {
    let keys = resolve_all(paths)?;
    Ok(sort_by_location(paths, &keys))
}

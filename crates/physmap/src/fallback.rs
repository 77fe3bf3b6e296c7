//! Extent reader for platforms without a physical extent query.
//!
//! There is no portable way to learn where a file's blocks live on disk, and
//! inventing a map would let callers mistake fiction for layout. Every query
//! here reports the capability as unsupported; callers that only need "does
//! this platform know" can test with [`crate::is_unsupported`].

use std::fs::File;
use std::io::{Error, ErrorKind, Result};

use crate::types::Extent;

/// Extent reader stub: every query fails with `ErrorKind::Unsupported`.
pub struct ExtentReader;

impl ExtentReader {
    /// Create a new stub reader.
    pub fn new() -> Self {
        Self
    }

    /// Batch size is meaningless on this platform (no buffer is used).
    pub fn with_batch_size(_batch: usize) -> Self {
        Self::new()
    }

    /// Always fails: physical extent maps are unavailable here.
    pub fn read_extents(&mut self, _file: &File) -> Result<Vec<Extent>> {
        Err(Error::new(
            ErrorKind::Unsupported,
            "physical extent maps are not available on this platform",
        ))
    }
}

impl Default for ExtentReader {
    fn default() -> Self {
        Self::new()
    }
}

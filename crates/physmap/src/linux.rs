use std::fs::File;
use std::io;

use crate::fiemap;
use crate::types::Extent;

/// Default number of result slots per ioctl call.
///
/// At 56 bytes per slot this keeps the buffer around 7 KiB; files with more
/// extents than this are paginated transparently.
const DEFAULT_BATCH: usize = 128;

/// Extent reader for Linux, backed by the FIEMAP ioctl.
///
/// The reader owns the kernel result buffer, so reusing one reader across
/// many files avoids reallocating per query.
pub struct ExtentReader {
    buf: Box<[u8]>,
}

impl ExtentReader {
    /// Create a reader with the default buffer size.
    pub fn new() -> Self {
        Self::with_batch_size(DEFAULT_BATCH)
    }

    /// Create a reader whose buffer holds `batch` extents per ioctl call.
    pub fn with_batch_size(batch: usize) -> Self {
        Self {
            buf: vec![0u8; fiemap::buf_size_for(batch)].into_boxed_slice(),
        }
    }

    /// Read the full physical extent map of a file.
    ///
    /// Extents come back in increasing logical-offset order, as the kernel
    /// reports them. An empty vec means the file has no allocated extents;
    /// an unsupported filesystem is an `Err` (see [`crate::is_unsupported`]),
    /// never an empty map.
    pub fn read_extents(&mut self, file: &File) -> io::Result<Vec<Extent>> {
        fiemap::map_extents(file, &mut self.buf)
    }
}

impl Default for ExtentReader {
    fn default() -> Self {
        Self::new()
    }
}

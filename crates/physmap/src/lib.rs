//! Physical extent maps for open files.
//!
//! This crate answers one question: where on the block device does a file's
//! data live? On Linux it asks the filesystem via the FIEMAP ioctl; other
//! platforms report the capability as unavailable rather than guessing.

use std::fs::File;
use std::io;

mod types;
pub use types::{Extent, ExtentFlags};

#[cfg(target_os = "linux")]
mod fiemap;
#[cfg(target_os = "linux")]
mod linux;

#[cfg(not(target_os = "linux"))]
mod fallback;

#[cfg(target_os = "linux")]
pub use linux::ExtentReader;

#[cfg(not(target_os = "linux"))]
pub use fallback::ExtentReader;

/// Convenience function: read the extent map of one file with a fresh reader.
///
/// When querying many files, construct an [`ExtentReader`] and reuse it so
/// its result buffer is shared between calls.
pub fn extents_for_file(file: &File) -> io::Result<Vec<Extent>> {
    ExtentReader::new().read_extents(file)
}

/// Whether an error means the filesystem or platform cannot answer extent
/// queries at all, as opposed to the query itself going wrong.
///
/// tmpfs and many network filesystems reject FIEMAP with `EOPNOTSUPP`,
/// `ENOTTY`, or (on some older filesystems) `EINVAL`.
pub fn is_unsupported(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::Unsupported {
        return true;
    }
    #[cfg(unix)]
    {
        matches!(
            err.raw_os_error(),
            Some(libc::EOPNOTSUPP) | Some(libc::ENOTTY) | Some(libc::EINVAL)
        )
    }
    #[cfg(not(unix))]
    {
        false
    }
}

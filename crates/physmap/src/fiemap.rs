//! Raw FIEMAP ioctl plumbing.
//!
//! The kernel ABI structs are modelled with zerocopy so requests and
//! results move through a single reusable byte buffer without any manual
//! pointer arithmetic.

use std::fs::File;
use std::io::{Error, Result};
use std::os::fd::AsRawFd;

use linux_raw_sys::ioctl::{FIEMAP_FLAG_SYNC, FS_IOC_FIEMAP};
use zerocopy::{FromBytes, IntoBytes as _};
use zerocopy_derive::*;

use crate::types::{Extent, ExtentFlags};

/// Request header for the FIEMAP ioctl (`struct fiemap` sans the trailing
/// extent array).
#[derive(Debug, Copy, Clone, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
struct FiemapHeader {
    /// Byte offset (inclusive) at which to start mapping.
    start: u64,

    /// Logical length of the range to map.
    length: u64,

    /// Request flags.
    flags: u32,

    /// (out) number of extents the kernel wrote to the buffer.
    mapped: u32,

    /// (in) number of extents the buffer can hold.
    count: u32,

    _reserved: u32,
}

/// One result slot (`struct fiemap_extent`).
#[derive(Debug, Copy, Clone, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
struct RawExtent {
    logical: u64,
    physical: u64,
    length: u64,
    _reserved1: [u64; 2],
    flags: u32,
    _reserved2: [u32; 3],
}

/// Buffer size needed to hold the request header plus `batch` result slots.
pub(crate) fn buf_size_for(batch: usize) -> usize {
    size_of::<FiemapHeader>() + batch.max(1) * size_of::<RawExtent>()
}

/// Map every extent of `file`, paginating through the kernel's results with
/// the given buffer.
///
/// The request carries `FIEMAP_FLAG_SYNC`, so dirty pages are flushed and
/// delayed allocations settle before mapping; repeat calls on an unchanged
/// file return the same extents.
///
/// A successful return with an empty vec means the file genuinely has no
/// allocated extents. Filesystems without FIEMAP support fail the ioctl
/// (typically `EOPNOTSUPP` or `ENOTTY`), which surfaces here as an error.
///
/// # Panics
///
/// Panics when `buf` cannot hold the header and at least one result slot;
/// size buffers with [`buf_size_for()`].
pub(crate) fn map_extents(file: &File, buf: &mut [u8]) -> Result<Vec<Extent>> {
    let header_size = size_of::<FiemapHeader>();
    let slot_size = size_of::<RawExtent>();
    assert!(
        buf.len() >= header_size + slot_size,
        "BUG: fiemap buffer too small (wanted at least {}, got {})",
        header_size + slot_size,
        buf.len(),
    );
    let count = u32::try_from((buf.len() - header_size) / slot_size).unwrap_or(u32::MAX);

    let mut extents = Vec::new();
    let mut start = 0u64;

    loop {
        // The kernel only writes `mapped` slots, so stale bytes from the
        // previous page must not survive into this one.
        buf.fill(0);

        FiemapHeader {
            start,
            length: u64::MAX - start,
            flags: FIEMAP_FLAG_SYNC,
            mapped: 0,
            count,
            _reserved: 0,
        }
        .write_to_prefix(buf)
        .map_err(|err| Error::other(err.to_string()))?;

        // SAFETY: the fd is borrowed from an open File for the duration of
        // the call, and the kernel only touches the buffer within the syscall.
        // The buffer is zeroed, correctly sized (asserted above), and `count`
        // is derived from its actual length, so the kernel cannot be told to
        // write past the end.
        if unsafe { libc::ioctl(file.as_raw_fd(), FS_IOC_FIEMAP as _, buf.as_mut_ptr()) } != 0 {
            return Err(Error::last_os_error());
        }

        let (header, mut rest) =
            FiemapHeader::read_from_prefix(&*buf).map_err(|err| Error::other(err.to_string()))?;

        if header.mapped == 0 {
            return Ok(extents);
        }

        for _ in 0..header.mapped {
            let (raw, tail) =
                RawExtent::read_from_prefix(rest).map_err(|err| Error::other(err.to_string()))?;
            rest = tail;
            start = raw.logical + raw.length;

            let flags = ExtentFlags(raw.flags);
            extents.push(Extent {
                logical: raw.logical,
                physical: raw.physical,
                length: raw.length,
                flags,
            });

            if flags.last() {
                return Ok(extents);
            }
        }

        // A full page without the LAST flag means there is more to fetch;
        // continue from just past the final extent we saw.
        if header.mapped < count {
            return Ok(extents);
        }
    }
}

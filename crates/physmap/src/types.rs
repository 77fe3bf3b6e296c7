// Extent flag bits, from linux/fiemap.h. Defined here rather than pulled
// from linux-raw-sys so the types compile on every target.
const EXTENT_LAST: u32 = 0x0001;
const EXTENT_UNKNOWN: u32 = 0x0002;
const EXTENT_DELALLOC: u32 = 0x0004;
const EXTENT_ENCODED: u32 = 0x0008;
const EXTENT_DATA_INLINE: u32 = 0x0200;
const EXTENT_UNWRITTEN: u32 = 0x0800;
const EXTENT_SHARED: u32 = 0x2000;

/// One physical extent of a file: a contiguous run of blocks on the backing
/// device covering a contiguous logical byte range of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Byte offset of the extent within the file.
    pub logical: u64,
    /// Byte offset of the extent on the underlying device.
    pub physical: u64,
    /// Length of the extent in bytes.
    pub length: u64,
    /// Properties reported by the filesystem for this extent.
    pub flags: ExtentFlags,
}

impl Extent {
    /// The end of the logical range (exclusive) covered by this extent.
    pub fn logical_end(&self) -> u64 {
        self.logical + self.length
    }
}

/// The raw flag word attached to an extent by the kernel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtentFlags(pub u32);

impl ExtentFlags {
    /// This is the final extent in the file.
    pub fn last(&self) -> bool {
        self.0 & EXTENT_LAST != 0
    }

    /// The physical location of this extent is not known (its `physical`
    /// field is meaningless).
    pub fn location_unknown(&self) -> bool {
        self.0 & EXTENT_UNKNOWN != 0
    }

    /// Allocation is delayed; no blocks have been assigned yet.
    pub fn delayed_allocation(&self) -> bool {
        self.0 & EXTENT_DELALLOC != 0
    }

    /// The data is encoded (e.g. compressed) on disk.
    pub fn encoded(&self) -> bool {
        self.0 & EXTENT_ENCODED != 0
    }

    /// The data is stored inline in filesystem metadata, not in data blocks.
    pub fn inline(&self) -> bool {
        self.0 & EXTENT_DATA_INLINE != 0
    }

    /// Space is allocated but unwritten (reads as zeros).
    pub fn unwritten(&self) -> bool {
        self.0 & EXTENT_UNWRITTEN != 0
    }

    /// The extent is shared with other files (reflink/dedup).
    pub fn shared(&self) -> bool {
        self.0 & EXTENT_SHARED != 0
    }
}

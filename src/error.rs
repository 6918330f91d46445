//! Error taxonomy and exit-code mapping.
//!
//! Two families: environmental (exit 1-9, 99) and consistency (exit
//! 10-21). `exit_code` is the single source of truth for this table.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsckError {
    #[error("Usage: {0}")]
    Usage(String),

    #[error("cannot open disk image file '{0}'")]
    ImageOpen(String),

    #[error("cannot read partition table of disk '{0}'")]
    PartitionTableRead(String),

    #[error("illegal partition number '{0}'")]
    IllegalPartition(String),

    #[error("partition {0} of disk '{1}' does not contain an EOS32 file system")]
    NotEos32(i64, String),

    #[error("failed to allocate tally tables")]
    Alloc,

    // Catch-all for conditions outside the closed set above.
    #[error("{0}")]
    Other(String),

    #[error("cannot read block {0} (0x{0:X})")]
    IoRead(u32),

    #[error("Block {0} is neither in a file nor free")]
    OrphanBlock(u32),

    #[error("Block {0} is in a file and free")]
    DoubleUse(u32),

    #[error("Block {0} is on the free list more than once")]
    DoubleFree(u32),

    #[error("Block {0} is in a file more than once or is in more than one file")]
    DoubleOccupied(u32),

    // File size vs. block-count consistency; not currently wired up.
    #[error("Inode {0} size is inconsistent with its block count")]
    SizeBlockMismatch(u32),

    #[error("Inode {0} with a link count of 0 appears in a directory")]
    ZeroLinkInDir(u32),

    #[error("Inode {0} with a link count of 0 is not free")]
    ZeroLinkNotFree(u32),

    #[error("Inode {0} with a link count higher than 0 does not appear in exactly n directories")]
    LinkCountMismatch(u32),

    // Inode type-field validity; not currently wired up.
    #[error("Inode {0} has an illegal type field")]
    IllegalInodeType(u32),

    #[error("Free inode {0} appears in a directory")]
    FreeInodeInDir(u32),

    #[error("Root-inode is not a directory")]
    RootNotDir,

    // Unreachable-directory detection; not currently wired up.
    #[error("Directory inode {0} is unreachable from the root")]
    UnreachableDirectory(u32),
}

impl FsckError {
    pub fn exit_code(&self) -> i32 {
        use FsckError::*;
        match self {
            Usage(_) => 1,
            ImageOpen(_) => 2,
            PartitionTableRead(_) => 3,
            IllegalPartition(_) => 4,
            NotEos32(_, _) => 5,
            Alloc => 6,
            Other(_) => 9,
            OrphanBlock(_) => 10,
            DoubleUse(_) => 11,
            DoubleFree(_) => 12,
            DoubleOccupied(_) => 13,
            SizeBlockMismatch(_) => 14,
            ZeroLinkInDir(_) => 15,
            ZeroLinkNotFree(_) => 16,
            LinkCountMismatch(_) => 17,
            IllegalInodeType(_) => 18,
            FreeInodeInDir(_) => 19,
            RootNotDir => 20,
            UnreachableDirectory(_) => 21,
            IoRead(_) => 99,
        }
    }
}

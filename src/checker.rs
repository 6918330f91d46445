//! Final cross-check: reconciles the block tally and the inode tally
//! built up by the earlier sweeps/walk into a single ordered pass of
//! violations. The first violation encountered wins; callers never see
//! more than one `FsckError` out of a single run.

use crate::error::FsckError;
use crate::inode_sweep::InodeMeta;
use crate::tally::Tally;

/// Walks data blocks `first_data_block..num_blocks` and live inodes
/// `2..meta.len()`, in that order, returning the first violation found.
pub fn cross_check(
    tally: &Tally,
    meta: &[InodeMeta],
    first_data_block: u32,
    num_blocks: u32,
) -> Result<(), FsckError> {
    for b in first_data_block..num_blocks {
        let c = tally.blocks[b as usize];
        if c.free == 0 && c.occupied == 0 {
            return Err(FsckError::OrphanBlock(b));
        }
        if c.free >= 1 && c.occupied >= 1 {
            return Err(FsckError::DoubleUse(b));
        }
        if c.free > 1 {
            return Err(FsckError::DoubleFree(b));
        }
        if c.occupied > 1 {
            return Err(FsckError::DoubleOccupied(b));
        }
    }

    for n in 2..meta.len() as u32 {
        let m = meta[n as usize];
        let refs = tally.inodes[n as usize].refs;

        if m.nlink == 0 && refs > 0 {
            return Err(FsckError::ZeroLinkInDir(n));
        }
        if m.mode != 0 && m.nlink == 0 {
            return Err(FsckError::ZeroLinkNotFree(n));
        }
        if m.nlink != 0 && m.nlink != refs {
            return Err(FsckError::LinkCountMismatch(n));
        }
        // FsckError::IllegalInodeType(n) would slot in here.
        if m.mode == 0 && refs > 0 {
            return Err(FsckError::FreeInodeInDir(n));
        }
        // FsckError::SizeBlockMismatch(n) and FsckError::UnreachableDirectory(n)
        // would slot in here, once file size and reachability are tracked.
    }

    Ok(())
}

//! Inode sweep.
//!
//! Linearly scans every inode slot, crediting block occupancy for every
//! direct/single-indirect/double-indirect pointer a live, non-device
//! inode holds, and recording each inode's `mode`/`nlink` for the
//! cross-checker to use once the directory walk has populated `refs`.

use std::io::{Read, Seek};

use crate::block_io::BlockReader;
use crate::blockptrs::{walk_block_pointers, BlockRef};
use crate::decode::{decode_inode, RawInode};
use crate::error::FsckError;
use crate::geometry::{InodeType, INODE_TABLE_START, INOPB};
use crate::superblock::SuperBlock;
use crate::tally::Tally;

/// Random-access read of a single inode by number, used by the directory
/// walk to re-read an inode's block pointers on demand.
pub fn read_inode<R: Read + Seek>(
    reader: &mut BlockReader<R>,
    inode_number: u32,
) -> Result<RawInode, FsckError> {
    let block = INODE_TABLE_START + inode_number / INOPB;
    let off = ((inode_number % INOPB) as usize) * 64;
    let buf = reader.read_block(block)?;
    Ok(decode_inode(&buf, off))
}

/// `mode`/`nlink` captured for each inode slot during the sweep, so the
/// cross-checker can reason about them without re-decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct InodeMeta {
    pub mode: u32,
    pub nlink: u32,
}

impl InodeMeta {
    pub fn inode_type(&self) -> InodeType {
        InodeType::from_mode(self.mode)
    }
}

/// Runs the inode sweep, crediting `tally.blocks` occupancy and returning
/// per-inode `(mode, nlink)` metadata indexed by inode number.
pub fn sweep_inodes<R: Read + Seek>(
    reader: &mut BlockReader<R>,
    sb: &SuperBlock,
    num_blocks: u32,
    tally: &mut Tally,
) -> Result<Vec<InodeMeta>, FsckError> {
    let mut meta = vec![InodeMeta::default(); sb.inode_capacity() as usize];

    for block_idx in INODE_TABLE_START..INODE_TABLE_START + sb.inode_list_size {
        tally.credit_occupied(block_idx);
        let buf = reader.read_block(block_idx)?;

        for slot in 0..INOPB {
            let inode_number = (block_idx - INODE_TABLE_START) * INOPB + slot;
            if inode_number == 0 {
                // The first slot of the first inode block is reserved.
                continue;
            }

            let off = (slot as usize) * 64;
            let raw = decode_inode(&buf, off);

            if let Some(m) = meta.get_mut(inode_number as usize) {
                m.mode = raw.mode;
                m.nlink = raw.nlink;
            }

            if raw.mode == 0 {
                // Free inode: no data blocks to traverse.
                continue;
            }

            let ty = raw.inode_type();
            if !ty.has_data_blocks() {
                // Character/block-special device: no data blocks.
                continue;
            }

            walk_block_pointers(reader, &raw, num_blocks, |r| match r {
                BlockRef::Index(b) | BlockRef::Data(b) => tally.credit_occupied(b),
            })?;
        }
    }

    Ok(meta)
}

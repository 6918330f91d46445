//! Orchestrates the consistency engine: init tallies, inode sweep,
//! free-list sweep, directory walk, cross-check. Strictly sequential;
//! each phase completes fully before the next begins.

use std::io::{Read, Seek};

use log::debug;

use crate::block_io::BlockReader;
use crate::checker::cross_check;
use crate::dirwalk::walk_from_root;
use crate::error::FsckError;
use crate::freelist::sweep_freelist;
use crate::geometry::{INODE_TABLE_START, SECTORS_PER_BLOCK, SUPERBLOCK_INDEX};
use crate::inode_sweep::sweep_inodes;
use crate::partition::PartitionInfo;
use crate::superblock::SuperBlock;
use crate::tally::Tally;

/// Runs every phase against `device`, a filesystem occupying the sectors
/// described by `partition`. Returns the first detected violation, or
/// `Ok(())` for a well-formed filesystem.
pub fn run<R: Read + Seek>(device: R, partition: PartitionInfo) -> Result<(), FsckError> {
    let num_blocks = (partition.size_sectors / SECTORS_PER_BLOCK) as u32;
    let mut reader = BlockReader::new(device, partition.start_sector);

    debug!("reading superblock (numBlocks = {num_blocks})");
    let sb = SuperBlock::read(&mut reader)?;
    let mut tally = Tally::new(num_blocks, sb.inode_capacity())?;

    // Blocks 0 (boot/reserved) and 1 (superblock) are always occupied;
    // the inode-table blocks credit themselves during the inode sweep.
    tally.credit_occupied(0);
    tally.credit_occupied(SUPERBLOCK_INDEX);

    debug!("sweeping inodes");
    let meta = sweep_inodes(&mut reader, &sb, num_blocks, &mut tally)?;

    debug!("sweeping free list");
    sweep_freelist(&mut reader, &sb, num_blocks, &mut tally)?;

    debug!("walking directory tree from root");
    walk_from_root(&mut reader, num_blocks, &mut tally)?;

    debug!("cross-checking tallies");
    let first_data_block = INODE_TABLE_START + sb.inode_list_size;
    cross_check(&tally, &meta, first_data_block, num_blocks)?;

    Ok(())
}

//! Free-list sweep.
//!
//! The head/link word itself is never credited as a cached free block;
//! only the numbers cached alongside it are. It is only the starting
//! point of the link-block chain walk, and each chain block is credited
//! because it is otherwise reachable solely through the free list.

use std::io::{Read, Seek};

use crate::block_io::BlockReader;
use crate::error::FsckError;
use crate::superblock::{LinkBlock, SuperBlock};
use crate::tally::Tally;

pub fn sweep_freelist<R: Read + Seek>(
    reader: &mut BlockReader<R>,
    sb: &SuperBlock,
    num_blocks: u32,
    tally: &mut Tally,
) -> Result<(), FsckError> {
    for &b in sb.free_block_cache.iter() {
        tally.credit_free(b);
    }

    let mut cur = sb.free_block_head;
    while cur != 0 {
        // The chain block itself occupies a disk block, reachable only
        // through the free list, so it is credited as free too.
        tally.credit_free(cur);
        if cur >= num_blocks {
            break;
        }
        let buf = reader.read_block(cur)?;
        let link = LinkBlock::decode(&buf);
        for &b in link.cache.iter() {
            tally.credit_free(b);
        }
        cur = link.next;
    }

    Ok(())
}

//! Superblock decoding.

use crate::decode::decode_u32;
use crate::error::FsckError;
use crate::geometry::{
    BLOCK_SIZE, INOPB, LINK_BLOCK_CACHE_OFFSET, LINK_BLOCK_NEXT_OFFSET, NICFREE,
    SB_FREE_BLOCK_CACHE_OFFSET, SB_FREE_BLOCK_HEAD_OFFSET, SB_INODE_LIST_SIZE_OFFSET,
    SUPERBLOCK_INDEX,
};
use crate::block_io::BlockReader;
use std::io::{Read, Seek};

/// Decoded fields of the superblock relevant to the consistency engine.
pub struct SuperBlock {
    /// Number of blocks occupied by the inode table.
    pub inode_list_size: u32,
    /// Head link of the free-block cache chain (0 if there is none beyond
    /// the 500 cached in the superblock itself).
    pub free_block_head: u32,
    /// The 500 free-block numbers cached directly in the superblock.
    pub free_block_cache: [u32; NICFREE],
}

impl SuperBlock {
    /// Total inode slot capacity implied by `inode_list_size`.
    pub fn inode_capacity(&self) -> u32 {
        self.inode_list_size * INOPB
    }

    pub fn read<R: Read + Seek>(reader: &mut BlockReader<R>) -> Result<Self, FsckError> {
        let buf = reader.read_block(SUPERBLOCK_INDEX)?;
        Ok(Self::decode(&buf))
    }

    fn decode(buf: &[u8; BLOCK_SIZE]) -> Self {
        let inode_list_size = decode_u32(buf, SB_INODE_LIST_SIZE_OFFSET);
        let free_block_head = decode_u32(buf, SB_FREE_BLOCK_HEAD_OFFSET);
        let mut free_block_cache = [0u32; NICFREE];
        for (i, slot) in free_block_cache.iter_mut().enumerate() {
            *slot = decode_u32(buf, SB_FREE_BLOCK_CACHE_OFFSET + i * 4);
        }
        SuperBlock {
            inode_list_size,
            free_block_head,
            free_block_cache,
        }
    }
}

/// Decodes the next-link and cached block numbers of one free-list link
/// block.
pub struct LinkBlock {
    pub next: u32,
    pub cache: [u32; NICFREE],
}

impl LinkBlock {
    pub fn decode(buf: &[u8; BLOCK_SIZE]) -> Self {
        let next = decode_u32(buf, LINK_BLOCK_NEXT_OFFSET);
        let mut cache = [0u32; NICFREE];
        for (i, slot) in cache.iter_mut().enumerate() {
            *slot = decode_u32(buf, LINK_BLOCK_CACHE_OFFSET + i * 4);
        }
        LinkBlock { next, cache }
    }
}

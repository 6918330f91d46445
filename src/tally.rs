//! Tally tables: zero-initialized `Vec`-backed free/occupied and
//! refs/visited counters, indexed by block and inode number.

use crate::error::FsckError;

/// Per-block free/occupied counters, indexed by block number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockCount {
    pub free: u32,
    pub occupied: u32,
}

/// Per-inode reference-count/visited bookkeeping, indexed by inode number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InodeCount {
    pub refs: u32,
    pub visited: bool,
}

pub struct Tally {
    pub blocks: Vec<BlockCount>,
    pub inodes: Vec<InodeCount>,
}

impl Tally {
    /// Allocates `num_blocks` block counters and `inode_capacity` inode
    /// counters, all zeroed. Fails with [`FsckError::Alloc`] rather than
    /// aborting the process if the allocation cannot be satisfied.
    pub fn new(num_blocks: u32, inode_capacity: u32) -> Result<Self, FsckError> {
        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(num_blocks as usize)
            .map_err(|_| FsckError::Alloc)?;
        blocks.resize(num_blocks as usize, BlockCount::default());

        let mut inodes = Vec::new();
        inodes
            .try_reserve_exact(inode_capacity as usize)
            .map_err(|_| FsckError::Alloc)?;
        inodes.resize(inode_capacity as usize, InodeCount::default());

        Ok(Tally { blocks, inodes })
    }

    /// Credits `occupied += 1` for block `b` if it is within range.
    pub fn credit_occupied(&mut self, b: u32) {
        if let Some(c) = self.blocks.get_mut(b as usize) {
            c.occupied += 1;
        }
    }

    /// Credits `free += 1` for block `b` if it is within range.
    pub fn credit_free(&mut self, b: u32) {
        if let Some(c) = self.blocks.get_mut(b as usize) {
            c.free += 1;
        }
    }

    /// Credits one incoming directory reference to inode `n`.
    pub fn credit_ref(&mut self, n: u32) {
        if let Some(c) = self.inodes.get_mut(n as usize) {
            c.refs += 1;
        }
    }

    pub fn is_visited(&self, n: u32) -> bool {
        self.inodes
            .get(n as usize)
            .map(|c| c.visited)
            .unwrap_or(false)
    }

    pub fn mark_visited(&mut self, n: u32) {
        if let Some(c) = self.inodes.get_mut(n as usize) {
            c.visited = true;
        }
    }
}

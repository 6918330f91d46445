//! Shared direct/single-indirect/double-indirect block pointer walk,
//! used by both the inode sweep and the directory walk. Does not itself
//! bounds-check block numbers against `num_blocks`; that's on the caller.

use std::io::{Read, Seek};

use crate::block_io::BlockReader;
use crate::decode::{decode_indirect_block, RawInode};
use crate::error::FsckError;

/// One block number reached while walking an inode's pointers: either an
/// index block (holds pointers, not data) or a data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRef {
    Index(u32),
    Data(u32),
}

/// Walks every block pointer of `inode`, invoking `visit` once per block
/// number reached: direct pointers and indirect-block leaves as
/// `BlockRef::Data`, single/double-indirect blocks themselves as
/// `BlockRef::Index`. Block number 0 always means "absent" and is never
/// reported.
pub fn walk_block_pointers<R, F>(
    reader: &mut BlockReader<R>,
    inode: &RawInode,
    num_blocks: u32,
    mut visit: F,
) -> Result<(), FsckError>
where
    R: Read + Seek,
    F: FnMut(BlockRef),
{
    for &d in &inode.direct {
        if d != 0 {
            visit(BlockRef::Data(d));
        }
    }

    if inode.single_indirect != 0 {
        visit(BlockRef::Index(inode.single_indirect));
        if inode.single_indirect < num_blocks {
            let buf = reader.read_block(inode.single_indirect)?;
            for &b in decode_indirect_block(&buf).iter() {
                if b != 0 {
                    visit(BlockRef::Data(b));
                }
            }
        }
    }

    if inode.double_indirect != 0 {
        visit(BlockRef::Index(inode.double_indirect));
        if inode.double_indirect < num_blocks {
            let buf = reader.read_block(inode.double_indirect)?;
            for &si in decode_indirect_block(&buf).iter() {
                if si == 0 {
                    continue;
                }
                visit(BlockRef::Index(si));
                if si < num_blocks {
                    let buf2 = reader.read_block(si)?;
                    for &b in decode_indirect_block(&buf2).iter() {
                        if b != 0 {
                            visit(BlockRef::Data(b));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

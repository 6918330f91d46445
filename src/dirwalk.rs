//! Directory walk: depth-first traversal from inode 1, counting incoming
//! references into `tally.inodes[_].refs` and marking each inode visited
//! at most once. Uses an explicit work-stack instead of recursion, since
//! tree depth can exceed the host stack on a corrupt image. `.` and `..`
//! entries are not filtered; they count like any other entry.

use std::io::{Read, Seek};

use crate::block_io::BlockReader;
use crate::blockptrs::{walk_block_pointers, BlockRef};
use crate::decode::decode_dir_block;
use crate::error::FsckError;
use crate::geometry::{InodeType, ROOT_INODE};
use crate::inode_sweep::read_inode;
use crate::tally::Tally;

pub fn walk_from_root<R: Read + Seek>(
    reader: &mut BlockReader<R>,
    num_blocks: u32,
    tally: &mut Tally,
) -> Result<(), FsckError> {
    let root = read_inode(reader, ROOT_INODE)?;
    if root.inode_type() != InodeType::Directory {
        return Err(FsckError::RootNotDir);
    }

    tally.mark_visited(ROOT_INODE);
    let mut worklist = vec![ROOT_INODE];
    while let Some(n) = worklist.pop() {
        visit_directory(reader, num_blocks, tally, n, &mut worklist)?;
    }
    Ok(())
}

fn visit_directory<R: Read + Seek>(
    reader: &mut BlockReader<R>,
    num_blocks: u32,
    tally: &mut Tally,
    n: u32,
    worklist: &mut Vec<u32>,
) -> Result<(), FsckError> {
    let raw = read_inode(reader, n)?;
    if raw.inode_type() != InodeType::Directory {
        return Ok(());
    }

    let mut data_blocks = Vec::new();
    walk_block_pointers(reader, &raw, num_blocks, |r| {
        if let BlockRef::Data(d) = r {
            data_blocks.push(d);
        }
    })?;

    for b in data_blocks {
        if b >= num_blocks {
            continue;
        }
        let buf = reader.read_block(b)?;
        for entry in decode_dir_block(&buf) {
            tally.credit_ref(entry.inode);
            if !tally.is_visited(entry.inode) {
                tally.mark_visited(entry.inode);
                worklist.push(entry.inode);
            }
        }
    }

    Ok(())
}

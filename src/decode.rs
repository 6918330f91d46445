//! Pure decoders for the EOS32 on-disk binary layouts.
//!
//! Every function here is a pure transformation of an already-read byte
//! buffer; none of them perform I/O.

use crate::geometry::{DIRENT_SIZE, DIRPB, DIRSIZ, INDIRECT_PER_BLOCK, InodeType};

/// Decodes a big-endian u32 at byte offset `off` within `buf`.
pub fn decode_u32(buf: &[u8], off: usize) -> u32 {
    u32::from_be_bytes(buf[off..off + 4].try_into().unwrap())
}

/// The fields of one on-disk inode relevant to the consistency engine.
#[derive(Debug, Clone, Copy)]
pub struct RawInode {
    pub mode: u32,
    pub nlink: u32,
    pub size: u32,
    pub direct: [u32; 6],
    pub single_indirect: u32,
    pub double_indirect: u32,
}

impl RawInode {
    pub fn inode_type(&self) -> InodeType {
        InodeType::from_mode(self.mode)
    }
}

/// Decodes one 64-byte inode record at byte offset `off` within `buf`.
pub fn decode_inode(buf: &[u8], off: usize) -> RawInode {
    let mode = decode_u32(buf, off);
    let nlink = decode_u32(buf, off + 4);
    let size = decode_u32(buf, off + 28);
    let mut direct = [0u32; 6];
    for (i, slot) in direct.iter_mut().enumerate() {
        *slot = decode_u32(buf, off + 32 + i * 4);
    }
    let single_indirect = decode_u32(buf, off + 56);
    let double_indirect = decode_u32(buf, off + 60);
    RawInode {
        mode,
        nlink,
        size,
        direct,
        single_indirect,
        double_indirect,
    }
}

/// One directory entry: the referenced inode number and its raw,
/// NUL-padded name field.
#[derive(Debug, Clone, Copy)]
pub struct DirEntry {
    pub inode: u32,
    pub name: [u8; DIRSIZ],
}

impl DirEntry {
    /// The name up to the first NUL byte, or the whole field if unterminated.
    pub fn name_str(&self) -> &str {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(DIRSIZ);
        std::str::from_utf8(&self.name[..end]).unwrap_or("<invalid-utf8>")
    }
}

/// Decodes up to [`DIRPB`] directory entries from a 4096-byte directory
/// block, filtering out empty slots (inode == 0).
pub fn decode_dir_block(buf: &[u8]) -> Vec<DirEntry> {
    let mut entries = Vec::with_capacity(DIRPB as usize);
    for i in 0..DIRPB as usize {
        let off = i * DIRENT_SIZE as usize;
        let inode = decode_u32(buf, off);
        if inode == 0 {
            continue;
        }
        let mut name = [0u8; DIRSIZ];
        name.copy_from_slice(&buf[off + 4..off + 4 + DIRSIZ]);
        entries.push(DirEntry { inode, name });
    }
    entries
}

/// Decodes an indirect block into its 1024 big-endian block-number slots
/// A slot value of 0 denotes "absent".
pub fn decode_indirect_block(buf: &[u8]) -> [u32; INDIRECT_PER_BLOCK] {
    let mut out = [0u32; INDIRECT_PER_BLOCK];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = decode_u32(buf, i * 4);
    }
    out
}

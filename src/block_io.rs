//! Block reader.
//!
//! Generic over `Read + Seek` so the same code drives a real disk image
//! file in production and an in-memory `Cursor<Vec<u8>>` in tests.

use std::io::{Read, Seek, SeekFrom};

use crate::error::FsckError;
use crate::geometry::{BLOCK_SIZE, SECTOR_SIZE};

pub struct BlockReader<R> {
    device: R,
    fs_start_bytes: u64,
}

impl<R: Read + Seek> BlockReader<R> {
    /// `fs_start_sectors` is the filesystem's starting sector within
    /// `device` (0 for whole-disk mode, or the partition's start sector).
    pub fn new(device: R, fs_start_sectors: u64) -> Self {
        BlockReader {
            device,
            fs_start_bytes: fs_start_sectors * SECTOR_SIZE,
        }
    }

    /// Reads block `b`, returning exactly `BLOCK_SIZE` bytes.
    ///
    /// Precondition: `0 <= b`. Callers are responsible for bounds-checking
    /// `b < numBlocks` before invocation when `b` comes from user data;
    /// this function does not validate it.
    pub fn read_block(&mut self, b: u32) -> Result<[u8; BLOCK_SIZE], FsckError> {
        let offset = self.fs_start_bytes + (b as u64) * (BLOCK_SIZE as u64);
        self.device
            .seek(SeekFrom::Start(offset))
            .map_err(|_| FsckError::IoRead(b))?;
        let mut buf = [0u8; BLOCK_SIZE];
        self.device
            .read_exact(&mut buf)
            .map_err(|_| FsckError::IoRead(b))?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn image_with_blocks(blocks: &[[u8; BLOCK_SIZE]]) -> Cursor<Vec<u8>> {
        let mut data = Vec::with_capacity(blocks.len() * BLOCK_SIZE);
        for b in blocks {
            data.extend_from_slice(b);
        }
        Cursor::new(data)
    }

    #[test]
    fn reads_block_at_correct_offset() {
        let mut b0 = [0u8; BLOCK_SIZE];
        b0[0] = 0xAA;
        let mut b1 = [0u8; BLOCK_SIZE];
        b1[0] = 0xBB;
        let image = image_with_blocks(&[b0, b1]);
        let mut reader = BlockReader::new(image, 0);

        assert_eq!(reader.read_block(0).unwrap()[0], 0xAA);
        assert_eq!(reader.read_block(1).unwrap()[0], 0xBB);
    }

    #[test]
    fn honors_fs_start_offset_in_sectors() {
        let mut b0 = [0u8; BLOCK_SIZE];
        b0[0] = 0x11;
        let mut b1 = [0u8; BLOCK_SIZE];
        b1[0] = 0x22;
        let image = image_with_blocks(&[b0, b1]);
        // Start the fs at the second block (8 sectors in).
        let mut reader = BlockReader::new(image, 8);

        assert_eq!(reader.read_block(0).unwrap()[0], 0x22);
    }

    #[test]
    fn short_read_is_io_error() {
        let image = Cursor::new(vec![0u8; 100]);
        let mut reader = BlockReader::new(image, 0);
        match reader.read_block(0) {
            Err(FsckError::IoRead(0)) => {}
            other => panic!("expected IoRead(0), got {other:?}"),
        }
    }
}

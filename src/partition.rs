//! Partition table decoding and whole-disk mode.

use std::io::{Read, Seek, SeekFrom};

use crate::decode::decode_u32;
use crate::error::FsckError;
use crate::geometry::{
    EOS32_PARTITION_TYPE, MAX_PARTITION_INDEX, PARTITION_ENTRY_SIZE, PARTITION_TABLE_SECTOR,
    PARTITION_TYPE_FLAG_MASK, SECTOR_SIZE,
};

/// Start sector and length in sectors of the filesystem selected on the
/// command line, whether via an explicit partition index or whole-disk
/// mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionInfo {
    pub start_sector: u64,
    pub size_sectors: u64,
}

/// Whole-disk mode (`*`): the filesystem spans the entire image.
pub fn whole_disk<R: Seek>(device: &mut R, image: &str) -> Result<PartitionInfo, FsckError> {
    let len = device
        .seek(SeekFrom::End(0))
        .map_err(|_| FsckError::ImageOpen(image.to_string()))?;
    Ok(PartitionInfo {
        start_sector: 0,
        size_sectors: len / SECTOR_SIZE,
    })
}

/// Reads partition table entry `index` at absolute sector 1 of `device`
/// and validates its type word against the EOS32 filesystem type.
pub fn read_partition<R: Read + Seek>(
    device: &mut R,
    index: i64,
    image: &str,
) -> Result<PartitionInfo, FsckError> {
    if !(0..=MAX_PARTITION_INDEX).contains(&index) {
        return Err(FsckError::IllegalPartition(index.to_string()));
    }

    let offset = PARTITION_TABLE_SECTOR * SECTOR_SIZE + (index as u64) * PARTITION_ENTRY_SIZE as u64;
    device
        .seek(SeekFrom::Start(offset))
        .map_err(|_| FsckError::PartitionTableRead(image.to_string()))?;
    let mut buf = [0u8; PARTITION_ENTRY_SIZE];
    device
        .read_exact(&mut buf)
        .map_err(|_| FsckError::PartitionTableRead(image.to_string()))?;

    let raw_type = decode_u32(&buf, 0);
    let fs_start = decode_u32(&buf, 4) as u64;
    let fs_size = decode_u32(&buf, 8) as u64;

    if raw_type & PARTITION_TYPE_FLAG_MASK != EOS32_PARTITION_TYPE {
        return Err(FsckError::NotEos32(index, image.to_string()));
    }

    Ok(PartitionInfo {
        start_sector: fs_start,
        size_sectors: fs_size,
    })
}

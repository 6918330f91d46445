//! End-to-end CLI tests: build a synthetic EOS32 image on disk and drive
//! the compiled binary through `assert_cmd`, checking the process exit
//! code contract rather than just the library API.

use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

const BLOCK_SIZE: usize = 4096;
const INODE_TABLE_START: u32 = 2;
const INOPB: u32 = 64;
const DIRENT_SIZE: usize = 64;
const SB_INODE_LIST_SIZE_OFFSET: usize = 8;
const SB_FREE_BLOCK_CACHE_OFFSET: usize = 2028;
const IFDIR: u32 = 0o30000;
const IFREG: u32 = 0o40000;

fn set_u32(image: &mut [u8], block: u32, off: usize, val: u32) {
    let base = block as usize * BLOCK_SIZE + off;
    image[base..base + 4].copy_from_slice(&val.to_be_bytes());
}

fn write_inode(image: &mut [u8], inode_number: u32, mode: u32, nlink: u32, direct0: u32) {
    let block = INODE_TABLE_START + inode_number / INOPB;
    let slot = inode_number % INOPB;
    let off = (slot as usize) * 64;
    set_u32(image, block, off, mode);
    set_u32(image, block, off + 4, nlink);
    set_u32(image, block, off + 32, direct0);
}

fn write_dirent(image: &mut [u8], block: u32, idx: u32, inode: u32, name: &str) {
    let off = idx * DIRENT_SIZE as u32;
    set_u32(image, block, off as usize, inode);
    let base = block as usize * BLOCK_SIZE + off as usize + 4;
    image[base..base + name.len()].copy_from_slice(name.as_bytes());
}

/// Root directory with two files, every remaining data block cached as
/// free in the superblock: a well-formed, clean filesystem.
fn clean_image(num_blocks: u32) -> Vec<u8> {
    let mut image = vec![0u8; num_blocks as usize * BLOCK_SIZE];
    set_u32(&mut image, 1, SB_INODE_LIST_SIZE_OFFSET, 1);

    write_inode(&mut image, 1, IFDIR | 0o755, 2, 10);
    write_inode(&mut image, 2, IFREG | 0o644, 1, 11);

    write_dirent(&mut image, 10, 0, 1, ".");
    write_dirent(&mut image, 10, 1, 1, "..");
    write_dirent(&mut image, 10, 2, 2, "file");

    let mut cache_idx = 0usize;
    for b in 3..num_blocks {
        if b == 10 || b == 11 {
            continue;
        }
        set_u32(&mut image, 1, SB_FREE_BLOCK_CACHE_OFFSET + cache_idx * 4, b);
        cache_idx += 1;
    }
    image
}

fn write_image(bytes: &[u8]) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(bytes).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn clean_image_exits_zero() {
    let image = write_image(&clean_image(20));
    Command::cargo_bin("eos32fsck")
        .unwrap()
        .arg(image.path())
        .arg("*")
        .assert()
        .code(0);
}

#[test]
fn orphan_block_exits_ten() {
    let mut bytes = clean_image(20);
    for i in 0..20 {
        let off = SB_FREE_BLOCK_CACHE_OFFSET + i * 4;
        let base = BLOCK_SIZE + off;
        let v = u32::from_be_bytes(bytes[base..base + 4].try_into().unwrap());
        if v == 12 {
            bytes[base..base + 4].copy_from_slice(&0u32.to_be_bytes());
            break;
        }
    }
    let image = write_image(&bytes);
    Command::cargo_bin("eos32fsck")
        .unwrap()
        .arg(image.path())
        .arg("*")
        .assert()
        .code(10);
}

#[test]
fn link_count_mismatch_exits_seventeen() {
    let mut bytes = clean_image(20);
    write_inode(&mut bytes, 2, IFREG | 0o644, 2, 11);
    let image = write_image(&bytes);
    Command::cargo_bin("eos32fsck")
        .unwrap()
        .arg(image.path())
        .arg("*")
        .assert()
        .code(17);
}

#[test]
fn root_not_directory_exits_twenty() {
    let mut bytes = clean_image(20);
    write_inode(&mut bytes, 1, IFREG | 0o755, 2, 10);
    let image = write_image(&bytes);
    Command::cargo_bin("eos32fsck")
        .unwrap()
        .arg(image.path())
        .arg("*")
        .assert()
        .code(20);
}

#[test]
fn missing_image_exits_two() {
    Command::cargo_bin("eos32fsck")
        .unwrap()
        .arg("/nonexistent/path/to/image")
        .arg("*")
        .assert()
        .code(2);
}

#[test]
fn illegal_partition_tokens_exit_four() {
    let image = write_image(&clean_image(20));
    for token in ["-1", "16", "3x", ""] {
        Command::cargo_bin("eos32fsck")
            .unwrap()
            .arg(image.path())
            .arg(token)
            .assert()
            .code(4);
    }
}

#[test]
fn wrong_arity_exits_one() {
    Command::cargo_bin("eos32fsck")
        .unwrap()
        .arg("only-one-arg")
        .assert()
        .code(1);
}

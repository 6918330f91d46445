//! Argument parsing and partition-selector validation.
//!
//! Both positional arguments are parsed as plain strings and validated
//! here, so a bad arity or an unparsable partition token surfaces as
//! this program's own exit code (1 or 4) rather than clap's.

use std::ffi::OsString;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

use crate::error::FsckError;
use crate::geometry::MAX_PARTITION_INDEX;

#[derive(Parser, Debug)]
#[command(
    name = "eos32fsck",
    about = "Offline consistency checker for EOS32 filesystem images"
)]
struct RawArgs {
    image: String,

    #[arg(allow_hyphen_values = true)]
    partition: String,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionSelector {
    Whole,
    Index(i64),
}

pub struct Cli {
    pub image: String,
    pub partition: PartitionSelector,
    pub verbosity: Verbosity<WarnLevel>,
}

pub fn parse_args<I, T>(args: I) -> Result<Cli, FsckError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let raw = RawArgs::try_parse_from(args).map_err(|e| FsckError::Usage(e.to_string()))?;
    let partition = parse_partition(&raw.partition)?;
    Ok(Cli {
        image: raw.image,
        partition,
        verbosity: raw.verbosity,
    })
}

fn parse_partition(s: &str) -> Result<PartitionSelector, FsckError> {
    if s == "*" {
        return Ok(PartitionSelector::Whole);
    }
    match s.parse::<i64>() {
        Ok(n) if (0..=MAX_PARTITION_INDEX).contains(&n) => Ok(PartitionSelector::Index(n)),
        _ => Err(FsckError::IllegalPartition(s.to_string())),
    }
}

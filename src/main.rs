use std::fs::File;
use std::io::stdout;
use std::process::ExitCode;

use eos32fsck::cli::{self, PartitionSelector};
use eos32fsck::engine;
use eos32fsck::error::FsckError;
use eos32fsck::partition;
use eos32fsck::report::{report_error, StreamSink};

fn try_main() -> Result<(), FsckError> {
    let cli = cli::parse_args(std::env::args_os())?;

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    let mut file = File::open(&cli.image).map_err(|_| FsckError::ImageOpen(cli.image.clone()))?;

    let info = match cli.partition {
        PartitionSelector::Whole => partition::whole_disk(&mut file, &cli.image)?,
        PartitionSelector::Index(n) => partition::read_partition(&mut file, n, &cli.image)?,
    };

    engine::run(file, info)
}

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut sink = StreamSink::new(stdout());
            let code = report_error(&mut sink, &err);
            ExitCode::from(code as u8)
        }
    }
}

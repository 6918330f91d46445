//! Reporting sink: accepts a message and an exit code. The engine itself
//! only produces `FsckError` values; turning one into user-facing output
//! is this module's job, kept separate so tests can swap in a sink that
//! captures output instead of writing to a stream.

use std::io::Write;

use crate::error::FsckError;

pub trait ReportSink {
    fn report(&mut self, message: &str, exit_code: i32);
}

/// Writes a single human-readable message line to the given stream.
pub struct StreamSink<W> {
    out: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(out: W) -> Self {
        StreamSink { out }
    }
}

impl<W: Write> ReportSink for StreamSink<W> {
    fn report(&mut self, message: &str, _exit_code: i32) {
        let _ = writeln!(self.out, "{message}");
    }
}

/// Reports `err` through `sink` and returns its exit code, for `main` to
/// pass to `std::process::exit`.
pub fn report_error<S: ReportSink>(sink: &mut S, err: &FsckError) -> i32 {
    let code = err.exit_code();
    sink.report(&err.to_string(), code);
    code
}

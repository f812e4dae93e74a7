//! Process exit codes, following BSD sysexits conventions.

use std::process::ExitCode;

/// Successful completion.
pub const OK: u8 = 0;
/// Bad or missing command line argument.
pub const USAGE: u8 = 64;
/// Corrupt data encountered while scanning a show file.
pub const DATAERR: u8 = 65;
/// Input or destination file missing or unreadable.
pub const NOINPUT: u8 = 66;
/// I/O failure during capture.
pub const IOERR: u8 = 74;

/// Convert a code constant to the process exit status.
pub fn status(code: u8) -> ExitCode {
    ExitCode::from(code)
}

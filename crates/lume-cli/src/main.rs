//! Lume — record, play back, and verify lighting show files.
//!
//! Three mutually exclusive modes:
//!
//! - `lume record --universes 1,2 <FILE>` — capture frame updates from
//!   stdin (one `universe hex-payload` line per update) until Ctrl-C or
//!   EOF
//! - `lume play [--iterations N] [--duration SECS] [--delay MS]
//!   [--start MS] [--stop MS] <FILE>` — replay a show to stdout with
//!   original timing
//! - `lume verify [--start MS] [--stop MS] <FILE>` — dry-run a show and
//!   print the summary playback would produce
//!
//! Exit codes follow BSD sysexits; see the `exit` module.

mod exit;
mod play;
mod record;
mod textio;
mod verify;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

/// Record a series of universes, or play back a previously recorded show.
#[derive(Parser, Debug)]
#[command(name = "lume")]
#[command(about = "Record a series of universes, or play back a previously recorded show")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record frame updates to a new show file
    Record {
        /// Comma separated list of universes to record
        #[arg(short, long)]
        universes: String,

        /// Destination show file
        file: PathBuf,
    },

    /// Play back a recorded show
    Play {
        /// Number of times to repeat the show, 0 means unlimited
        #[arg(short, long, default_value_t = 1)]
        iterations: u32,

        /// Length of time (seconds) to run for, 0 means unbounded
        #[arg(long, default_value_t = 0)]
        duration: u64,

        /// Delay in ms between successive iterations
        #[arg(short, long, default_value_t = 0)]
        delay: u64,

        /// Time (milliseconds) in the show file to start playback from
        #[arg(long, default_value_t = 0)]
        start: u64,

        /// Time (milliseconds) in the show file to stop playback at
        #[arg(long, default_value_t = 0)]
        stop: u64,

        /// Source show file
        file: PathBuf,
    },

    /// Scan a show file and report what playback would emit
    Verify {
        /// Time (milliseconds) in the show file to start from
        #[arg(long, default_value_t = 0)]
        start: u64,

        /// Time (milliseconds) in the show file to stop at
        #[arg(long, default_value_t = 0)]
        stop: u64,

        /// Show file to verify
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are successful exits; everything else is
            // a usage error with the distinct sysexits status.
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit::OK,
                _ => exit::USAGE,
            };
            let _ = e.print();
            return exit::status(code);
        }
    };

    match cli.command {
        Commands::Record { universes, file } => record::execute(&universes, &file),
        Commands::Play {
            iterations,
            duration,
            delay,
            start,
            stop,
            file,
        } => play::execute(iterations, duration, delay, start, stop, &file),
        Commands::Verify { start, stop, file } => verify::execute(start, stop, &file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_a_record_invocation() {
        let cli = Cli::try_parse_from(["lume", "record", "-u", "1,2", "out.lume"]).unwrap();
        match cli.command {
            Commands::Record { universes, file } => {
                assert_eq!(universes, "1,2");
                assert_eq!(file, PathBuf::from("out.lume"));
            }
            _ => panic!("expected record"),
        }
    }

    #[test]
    fn parses_a_play_invocation_with_window() {
        let cli = Cli::try_parse_from([
            "lume", "play", "-i", "0", "--start", "10000", "--stop", "60000", "show.lume",
        ])
        .unwrap();
        match cli.command {
            Commands::Play {
                iterations,
                start,
                stop,
                ..
            } => {
                assert_eq!(iterations, 0);
                assert_eq!(start, 10_000);
                assert_eq!(stop, 60_000);
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn record_requires_a_universe_list() {
        let err = Cli::try_parse_from(["lume", "record", "out.lume"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn modes_are_mutually_exclusive_by_construction() {
        assert!(Cli::try_parse_from(["lume", "play", "a.lume", "verify"]).is_err());
    }
}

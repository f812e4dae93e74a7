//! `lume play` — replay a show file to the transport.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use log::warn;

use lume_engine::{PlayError, PlaybackWindow, ShowPlayer};
use lume_show::ShowError;

use crate::exit;
use crate::textio::TextFrameSink;

pub fn execute(
    iterations: u32,
    duration: u64,
    delay: u64,
    start: u64,
    stop: u64,
    file: &Path,
) -> ExitCode {
    let window = PlaybackWindow {
        start_ms: start,
        stop_ms: stop,
        iterations,
        duration_secs: duration,
        inter_iteration_delay_ms: delay,
    };

    let mut player = ShowPlayer::new(file, window);
    if let Err(e) = player.init() {
        return match e {
            PlayError::Window(e) => {
                eprintln!("{e}");
                exit::status(exit::USAGE)
            }
            PlayError::Show(ShowError::Io(e)) => {
                eprintln!("cannot open {}: {e}", file.display());
                exit::status(exit::NOINPUT)
            }
            PlayError::Show(e) => {
                eprintln!("{e}");
                exit::status(exit::DATAERR)
            }
        };
    }

    let cancel = player.cancel_handle();
    if ctrlc::set_handler(move || cancel.cancel()).is_err() {
        warn!("could not install signal handler; Ctrl-C will not stop playback cleanly");
    }

    let mut sink = TextFrameSink::new(io::stdout());
    let summary = player.playback(&mut sink);

    match summary.error {
        None => exit::status(exit::OK),
        Some(e) => {
            eprintln!("playback aborted: {e}");
            exit::status(exit::DATAERR)
        }
    }
}

//! `lume verify` — dry-run a show file and print the summary.

use std::path::Path;
use std::process::ExitCode;

use lume_engine::{PlaybackSummary, PlaybackWindow, VerifyEngine};
use lume_show::{ShowError, ShowLoader};

use crate::exit;

pub fn execute(start: u64, stop: u64, file: &Path) -> ExitCode {
    let window = PlaybackWindow {
        start_ms: start,
        stop_ms: stop,
        ..PlaybackWindow::default()
    };

    let engine = match VerifyEngine::new(window.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            return exit::status(exit::USAGE);
        }
    };

    let mut loader = match ShowLoader::open(file) {
        Ok(loader) => loader,
        Err(ShowError::Io(e)) => {
            eprintln!("cannot open {}: {e}", file.display());
            return exit::status(exit::NOINPUT);
        }
        Err(e) => {
            eprintln!("{e}");
            return exit::status(exit::DATAERR);
        }
    };

    let summary = engine.run(&mut loader);
    print_summary(&window, &summary);

    match &summary.error {
        None => exit::status(exit::OK),
        Some(e) => {
            eprintln!("error loading show: {e}");
            exit::status(exit::DATAERR)
        }
    }
}

/// The summary block is printed even when a data error truncated the
/// scan, so everything counted before the corruption point is visible.
fn print_summary(window: &PlaybackWindow, summary: &PlaybackSummary) {
    println!("------------ Summary ----------");
    if window.start_ms > 0 {
        println!("Starting at: {} second(s)", seconds(window.start_ms));
    }
    if window.stop_ms > 0 {
        println!("Stopping at: {} second(s)", seconds(window.stop_ms));
    }
    for (universe, frames) in &summary.frames_by_universe {
        println!("Universe {universe}: {frames} frames");
    }
    println!();
    println!("Total frames: {}", summary.total_frames());
    println!("Playback time: {} second(s)", seconds(summary.playback_time_ms));
}

fn seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

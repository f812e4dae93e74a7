//! `lume record` — capture frame updates to a new show file.

use std::path::Path;
use std::process::ExitCode;

use log::warn;

use lume_core::UniverseId;
use lume_engine::ShowRecorder;

use crate::exit;
use crate::textio::StdinFrameSource;

pub fn execute(universes_arg: &str, file: &Path) -> ExitCode {
    let universes = match parse_universes(universes_arg) {
        Ok(universes) => universes,
        Err(msg) => {
            eprintln!("{msg}");
            return exit::status(exit::USAGE);
        }
    };

    let mut recorder = ShowRecorder::new(file, universes);
    let mut source = StdinFrameSource::new(Some(recorder.stop_handle()));
    if let Err(e) = recorder.init(&mut source) {
        eprintln!("cannot record to {}: {e}", file.display());
        return exit::status(exit::NOINPUT);
    }

    println!("Recording, hit Control-C to end");
    let stop = recorder.stop_handle();
    if ctrlc::set_handler(move || stop.stop()).is_err() {
        // No asynchronous stop path could be installed; stop now so the
        // capture loop cannot block forever. Stdin EOF still ends the
        // session in the piped case.
        warn!("could not install signal handler; stopping capture");
        recorder.stop_handle().stop();
    }

    if let Err(e) = recorder.record() {
        eprintln!("recording failed: {e}");
        return exit::status(exit::IOERR);
    }

    println!("Saved {} frames", recorder.frame_count());
    exit::status(exit::OK)
}

/// Parse a comma separated universe list (`"1,2,7"`).
fn parse_universes(arg: &str) -> Result<Vec<UniverseId>, String> {
    let mut universes = Vec::new();
    for token in arg.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err("universe list contains an empty entry".into());
        }
        let id: u32 = token
            .parse()
            .map_err(|_| format!("{token:?} is not a valid universe number"))?;
        universes.push(UniverseId(id));
    }
    Ok(universes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_comma_separated_list() {
        assert_eq!(
            parse_universes("1,2,7").unwrap(),
            vec![UniverseId(1), UniverseId(2), UniverseId(7)]
        );
    }

    #[test]
    fn tolerates_whitespace_around_entries() {
        assert_eq!(
            parse_universes(" 3 , 4 ").unwrap(),
            vec![UniverseId(3), UniverseId(4)]
        );
    }

    #[test]
    fn rejects_empty_and_non_numeric_entries() {
        assert!(parse_universes("").is_err());
        assert!(parse_universes("1,,2").is_err());
        assert!(parse_universes("1,two").is_err());
        assert!(parse_universes("-1").is_err());
    }
}

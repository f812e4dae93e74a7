//! Line-oriented frame transport for pipes.
//!
//! Frames cross the process boundary as text lines, one frame per
//! line: the universe id, whitespace, and the payload as lowercase hex
//! (`1 00ff3c`). A missing payload token is an empty frame; blank
//! lines and `#` comments are skipped. Recording reads this format
//! from stdin, playback writes it to stdout, so shows can be driven
//! through shell pipes without any network transport.

use std::io::{self, BufRead, Write};
use std::thread;

use log::warn;

use lume_core::{FrameData, FrameSink, UniverseId};
use lume_engine::{FrameSource, StopHandle, UpdateSender};

// ── Sink: playback → text lines ─────────────────────────────────

/// [`FrameSink`] writing one text line per frame.
///
/// Flushes after every frame: playback timing is the point, so frames
/// must not linger in a buffer.
pub struct TextFrameSink<W: Write> {
    out: W,
}

impl<W: Write> TextFrameSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> FrameSink for TextFrameSink<W> {
    fn send_frame(&mut self, universe: UniverseId, frame: &FrameData) -> io::Result<()> {
        writeln!(self.out, "{} {}", universe, hex::encode(frame.as_bytes()))?;
        self.out.flush()
    }
}

// ── Source: text lines → recorder ───────────────────────────────

/// [`FrameSource`] reading update lines from stdin on a background
/// thread.
///
/// Malformed lines are logged and skipped — delivery is best-effort by
/// contract. On stdin EOF the optional [`StopHandle`] fires, so piped
/// input ends the recording without a signal.
pub struct StdinFrameSource {
    stop_on_eof: Option<StopHandle>,
}

impl StdinFrameSource {
    pub fn new(stop_on_eof: Option<StopHandle>) -> Self {
        Self { stop_on_eof }
    }
}

impl FrameSource for StdinFrameSource {
    fn subscribe(&mut self, _universes: &[UniverseId], updates: UpdateSender) -> io::Result<()> {
        let stop = self.stop_on_eof.take();
        thread::Builder::new()
            .name("lume-stdin".into())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    let line = match line {
                        Ok(line) => line,
                        Err(_) => break,
                    };
                    match parse_update_line(&line) {
                        Ok(None) => {}
                        Ok(Some((universe, frame))) => {
                            if !updates.send_update(universe, frame) {
                                // Recorder gone; no point reading on.
                                break;
                            }
                        }
                        Err(msg) => warn!("ignoring malformed update line: {msg}"),
                    }
                }
                if let Some(stop) = stop {
                    stop.stop();
                }
            })?;
        Ok(())
    }
}

/// Parse one update line. `Ok(None)` for blank lines and comments.
fn parse_update_line(line: &str) -> Result<Option<(UniverseId, FrameData)>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = line.split_whitespace();
    let universe_token = tokens.next().unwrap_or_default();
    let universe: u32 = universe_token
        .parse()
        .map_err(|_| format!("{universe_token:?} is not a valid universe id"))?;

    let payload = match tokens.next() {
        Some(hex_token) => {
            hex::decode(hex_token).map_err(|e| format!("bad hex payload: {e}"))?
        }
        None => Vec::new(),
    };
    if tokens.next().is_some() {
        return Err(format!("trailing tokens after payload: {line:?}"));
    }

    let frame = FrameData::new(payload).map_err(|e| e.to_string())?;
    Ok(Some((UniverseId(universe), frame)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_writes_universe_and_hex_payload() {
        let mut sink = TextFrameSink::new(Vec::new());
        sink.send_frame(UniverseId(1), &FrameData::new(vec![0x00, 0xff, 0x3c]).unwrap())
            .unwrap();
        sink.send_frame(UniverseId(12), &FrameData::new(Vec::new()).unwrap())
            .unwrap();
        let out = String::from_utf8(sink.out).unwrap();
        assert_eq!(out, "1 00ff3c\n12 \n");
    }

    #[test]
    fn parses_update_lines() {
        let (universe, frame) = parse_update_line("1 00ff3c").unwrap().unwrap();
        assert_eq!(universe, UniverseId(1));
        assert_eq!(frame.as_bytes(), &[0x00, 0xff, 0x3c]);
    }

    #[test]
    fn missing_payload_is_an_empty_frame() {
        let (_, frame) = parse_update_line("7").unwrap().unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        assert!(parse_update_line("").unwrap().is_none());
        assert!(parse_update_line("   ").unwrap().is_none());
        assert!(parse_update_line("# cue 12").unwrap().is_none());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_update_line("one 00ff").is_err());
        assert!(parse_update_line("1 zz").is_err());
        assert!(parse_update_line("1 00 extra").is_err());
    }

    #[test]
    fn rejects_oversize_payload() {
        let payload = "00".repeat(lume_core::MAX_FRAME_LEN + 1);
        assert!(parse_update_line(&format!("1 {payload}")).is_err());
    }

    #[test]
    fn sink_roundtrips_through_parser() {
        let mut sink = TextFrameSink::new(Vec::new());
        let frame = FrameData::new(vec![0xab, 0xcd]).unwrap();
        sink.send_frame(UniverseId(42), &frame).unwrap();
        let line = String::from_utf8(sink.out).unwrap();
        let (universe, parsed) = parse_update_line(line.trim_end()).unwrap().unwrap();
        assert_eq!(universe, UniverseId(42));
        assert_eq!(parsed, frame);
    }
}

//! Binary encode/decode for the show file format.
//!
//! All integers are little-endian. Frame payloads are length-prefixed
//! with a `u16` length bounded by [`MAX_FRAME_LEN`]. The format is
//! intentionally simple — no compression, no checksums, no alignment
//! padding — and forward-readable without seeking, so it streams
//! through both the record and playback paths.

use std::io::{Read, Write};

use lume_core::{FrameData, UniverseId, MAX_FRAME_LEN};

use crate::error::ShowError;
use crate::types::ShowEntry;
use crate::{FORMAT_VERSION, MAGIC};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), ShowError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u16.
pub fn write_u16_le(w: &mut dyn Write, v: u16) -> Result<(), ShowError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), ShowError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, ShowError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u16.
pub fn read_u16_le(r: &mut dyn Read) -> Result<u16, ShowError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, ShowError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the show file header (magic and format version).
pub fn encode_header(w: &mut dyn Write) -> Result<(), ShowError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    Ok(())
}

/// Decode and validate the show file header.
pub fn decode_header(r: &mut dyn Read) -> Result<(), ShowError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ShowError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(ShowError::UnsupportedVersion { found: version });
    }

    Ok(())
}

// ── Entry encode/decode ─────────────────────────────────────────

/// Encode a single entry.
pub fn encode_entry(w: &mut dyn Write, entry: &ShowEntry) -> Result<(), ShowError> {
    write_u32_le(w, entry.universe.0)?;
    write_u32_le(w, entry.wait_delta_ms)?;
    // FrameData is bounded at construction, so the cast is lossless.
    write_u16_le(w, entry.frame.len() as u16)?;
    w.write_all(entry.frame.as_bytes())?;
    Ok(())
}

/// Decode a single entry.
///
/// Returns `Ok(None)` on clean EOF (zero bytes available at an entry
/// boundary), `Ok(Some(entry))` on success, or an error on truncated or
/// corrupt data.
pub fn decode_entry(r: &mut dyn Read) -> Result<Option<ShowEntry>, ShowError> {
    // Read the universe id byte-by-byte to distinguish clean EOF
    // (zero bytes available) from truncation (1-3 bytes before EOF).
    let mut universe_buf = [0u8; 4];
    let mut filled = 0;
    while filled < 4 {
        match r.read(&mut universe_buf[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    // Clean EOF — no more entries.
                    return Ok(None);
                }
                return Err(ShowError::MalformedEntry {
                    detail: format!("truncated entry: got {filled} of 4 bytes for universe id"),
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ShowError::Io(e)),
        }
    }
    let universe = UniverseId(u32::from_le_bytes(universe_buf));

    let wait_delta_ms = read_u32_le(r).map_err(truncated_as_malformed("wait delta"))?;

    let frame_len = read_u16_le(r).map_err(truncated_as_malformed("frame length"))? as usize;
    if frame_len > MAX_FRAME_LEN {
        return Err(ShowError::MalformedEntry {
            detail: format!("frame length {frame_len} exceeds the {MAX_FRAME_LEN} byte limit"),
        });
    }

    let mut payload = vec![0u8; frame_len];
    r.read_exact(&mut payload)
        .map_err(|e| map_truncation(ShowError::Io(e), "frame payload"))?;

    let frame = FrameData::new(payload).map_err(|e| ShowError::MalformedEntry {
        detail: e.to_string(),
    })?;

    Ok(Some(ShowEntry {
        universe,
        wait_delta_ms,
        frame,
    }))
}

/// Mid-entry EOF is corruption, not exhaustion: rewrap `UnexpectedEof`
/// as a malformed-entry error naming the field that was cut short.
fn truncated_as_malformed(field: &'static str) -> impl Fn(ShowError) -> ShowError {
    move |e| map_truncation(e, field)
}

fn map_truncation(e: ShowError, field: &'static str) -> ShowError {
    match e {
        ShowError::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
            ShowError::MalformedEntry {
                detail: format!("truncated entry: unexpected EOF reading {field}"),
            }
        }
        other => other,
    }
}

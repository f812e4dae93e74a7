//! Forward-only show file reader.
//!
//! [`ShowLoader`] is the single read path shared by playback and
//! verification: both walk a file through exactly this cursor, so the
//! two paths can never disagree about what a file contains.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::codec::{decode_entry, decode_header};
use crate::error::ShowError;
use crate::types::ShowEntry;

/// Cursor state, sticky once terminal.
#[derive(Clone, Debug)]
enum CursorState {
    /// Entries may still be produced.
    Active,
    /// The file ran out cleanly.
    Exhausted,
    /// A decode or I/O failure occurred; the rendered message is kept
    /// so every later call reports the same failure.
    Failed(String),
}

/// Reads show entries from a byte stream, one at a time.
///
/// Generic over `R: Read` so tests can use `&[u8]` and production code
/// can use `BufReader<File>`. The header is validated on construction.
///
/// Terminal states are sticky: after clean exhaustion every later call
/// returns `Ok(None)`, and after a failure every later call returns an
/// equivalent error, without touching the underlying reader again. A
/// loader is never resurrected; rewinding means opening a fresh one.
pub struct ShowLoader<R: Read> {
    reader: R,
    state: CursorState,
    entries_read: u64,
}

impl ShowLoader<BufReader<File>> {
    /// Open a show file from disk, reading and validating the header.
    ///
    /// Fails with the underlying I/O error when the path cannot be
    /// opened, or a format error when the header is not a show file.
    pub fn open(path: &Path) -> Result<Self, ShowError> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read> ShowLoader<R> {
    /// Wrap a byte stream, reading and validating the header.
    pub fn new(mut reader: R) -> Result<Self, ShowError> {
        decode_header(&mut reader)?;
        Ok(Self {
            reader,
            state: CursorState::Active,
            entries_read: 0,
        })
    }

    /// Advance the cursor by exactly one record.
    ///
    /// Returns `Ok(Some(entry))` when an entry was produced, `Ok(None)`
    /// on clean exhaustion, or an error for malformed data or an I/O
    /// failure mid-scan.
    pub fn next_entry(&mut self) -> Result<Option<ShowEntry>, ShowError> {
        match &self.state {
            CursorState::Exhausted => Ok(None),
            CursorState::Failed(detail) => Err(ShowError::MalformedEntry {
                detail: detail.clone(),
            }),
            CursorState::Active => match decode_entry(&mut self.reader) {
                Ok(Some(entry)) => {
                    self.entries_read += 1;
                    Ok(Some(entry))
                }
                Ok(None) => {
                    self.state = CursorState::Exhausted;
                    Ok(None)
                }
                Err(e) => {
                    self.state = CursorState::Failed(e.to_string());
                    Err(e)
                }
            },
        }
    }

    /// Number of entries produced so far.
    pub fn entries_read(&self) -> u64 {
        self.entries_read
    }
}

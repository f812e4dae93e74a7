//! Append-only show file writer.
//!
//! [`ShowWriter`] streams entries to any `Write` sink. The header is
//! written immediately on construction, so even an empty recording is
//! a valid, loadable show file.

use std::io::Write;

use crate::codec::{encode_entry, encode_header};
use crate::error::ShowError;
use crate::types::ShowEntry;

/// Writes show entries to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use lume_core::{FrameData, UniverseId};
/// use lume_show::{ShowEntry, ShowLoader, ShowWriter};
///
/// // Write two entries to an in-memory buffer.
/// let mut writer = ShowWriter::new(Vec::new()).unwrap();
/// for delta in [0u32, 25] {
///     writer.append(&ShowEntry {
///         universe: UniverseId(1),
///         wait_delta_ms: delta,
///         frame: FrameData::new(vec![0x40]).unwrap(),
///     }).unwrap();
/// }
/// assert_eq!(writer.frames_written(), 2);
/// let buf = writer.into_inner();
///
/// // Read them back.
/// let mut loader = ShowLoader::new(buf.as_slice()).unwrap();
/// assert_eq!(loader.next_entry().unwrap().unwrap().wait_delta_ms, 0);
/// assert_eq!(loader.next_entry().unwrap().unwrap().wait_delta_ms, 25);
/// assert!(loader.next_entry().unwrap().is_none());
/// ```
pub struct ShowWriter<W: Write> {
    writer: W,
    frames_written: u64,
}

impl<W: Write> ShowWriter<W> {
    /// Create a new show writer, immediately writing the header.
    pub fn new(mut writer: W) -> Result<Self, ShowError> {
        encode_header(&mut writer)?;
        Ok(Self {
            writer,
            frames_written: 0,
        })
    }

    /// Append one entry.
    pub fn append(&mut self, entry: &ShowEntry) -> Result<(), ShowError> {
        encode_entry(&mut self.writer, entry)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), ShowError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of entries written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

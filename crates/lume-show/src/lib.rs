//! On-disk show file format for recorded lighting sessions.
//!
//! A show file is an append-only sequence of timestamped frame entries
//! across one or more universes, merged onto a single global clock: each
//! entry carries the milliseconds elapsed since the previous entry in
//! the file, regardless of universe, so a single sequential reader
//! reconstructs the strict global order without per-universe timelines.
//!
//! # Architecture
//!
//! - [`ShowWriter`] appends entries to any `Write` sink
//! - [`ShowLoader`] reads entries back from any `Read` source
//! - All I/O uses a custom binary codec (no serde dependency)
//!
//! # Format
//!
//! ```text
//! [MAGIC "LUME"] [VERSION u8]
//! [Entry 1] [Entry 2] ... [Entry N]
//! ```
//!
//! Each entry: universe id (`u32` LE), wait delta in milliseconds
//! (`u32` LE), payload length (`u16` LE, at most 512), payload bytes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod loader;
pub mod types;
pub mod writer;

pub use error::ShowError;
pub use loader::ShowLoader;
pub use types::ShowEntry;
pub use writer::ShowWriter;

/// Magic bytes at the start of every show file.
pub const MAGIC: [u8; 4] = *b"LUME";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;

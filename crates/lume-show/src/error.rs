//! Error types for the show file format.

use std::fmt;
use std::io;

/// Errors reading or writing a show file.
#[derive(Debug)]
pub enum ShowError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The file does not start with the expected `b"LUME"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the file.
        found: u8,
    },
    /// An entry could not be decoded (truncated or corrupt data).
    MalformedEntry {
        /// Human-readable description of what went wrong.
        detail: String,
    },
}

impl ShowError {
    /// Whether this error denotes corrupt or truncated file content, as
    /// opposed to an I/O failure reaching the file at all.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

impl fmt::Display for ShowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"LUME\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::MalformedEntry { detail } => write!(f, "malformed entry: {detail}"),
        }
    }
}

impl std::error::Error for ShowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ShowError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

//! Error types for core frame validation.

use std::fmt;

/// Errors constructing a [`FrameData`](crate::FrameData).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// The payload exceeds [`MAX_FRAME_LEN`](crate::MAX_FRAME_LEN) bytes.
    TooLarge {
        /// The offending payload length.
        len: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { len } => {
                write!(
                    f,
                    "frame payload of {len} bytes exceeds the {} byte limit",
                    crate::MAX_FRAME_LEN
                )
            }
        }
    }
}

impl std::error::Error for FrameError {}

//! Core types and traits for the Lume show recording toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the universe identifier, the bounded frame payload type, and the
//! collaborator traits implemented at the edges of the system: the
//! transport sink frames are emitted to, and the monotonic clock the
//! recorder derives inter-event timing from.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod frame;
pub mod id;
pub mod traits;

pub use error::FrameError;
pub use frame::{FrameData, MAX_FRAME_LEN};
pub use id::UniverseId;
pub use traits::{Clock, FrameSink, MonotonicClock};

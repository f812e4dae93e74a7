//! Capture, playback, and verification engines for Lume show files.
//!
//! # Architecture
//!
//! - [`ShowRecorder`] captures live frame-change events to a new show
//!   file, merging all universes onto one global clock
//! - [`ShowPlayer`] replays a file against a [`FrameSink`](lume_core::FrameSink)
//!   under a [`PlaybackWindow`]
//! - [`VerifyEngine`] is the player's dry-run twin: identical windowing
//!   and counters, no transmission, no sleeping
//!
//! The player and verifier share the windowing routine in [`window`],
//! parameterized by an emit capability; duplicating the
//! start/stop/seed-frame logic would be the primary correctness risk in
//! this system, so there is exactly one copy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod player;
pub mod recorder;
pub mod summary;
pub mod verify;
pub mod window;

pub use player::{PlayError, ShowPlayer};
pub use recorder::{FrameSource, RecordError, ShowRecorder, StopHandle, UpdateSender};
pub use summary::PlaybackSummary;
pub use verify::VerifyEngine;
pub use window::{CancelHandle, PlaybackWindow, WindowError};

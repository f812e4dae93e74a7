//! Test utilities and mock collaborators for Lume development.
//!
//! Provides mock implementations of the core traits ([`Clock`],
//! [`FrameSink`]) and show-file fixture builders so engine and CLI
//! tests can run without hardware, wall-clock time, or hand-rolled
//! byte buffers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lume_core::{Clock, FrameData, FrameSink, UniverseId};

pub mod fixtures;

pub use fixtures::{encode_show, write_show_file};

/// Manually-advanced [`Clock`].
///
/// Clones share the same underlying time, so a test can hold one handle
/// to advance time while the code under test reads another.
#[derive(Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump the clock to an absolute offset from its epoch.
    pub fn set_ms(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        Duration::from_millis(self.now_ms.load(Ordering::SeqCst))
    }
}

/// [`FrameSink`] that records every transmitted frame.
#[derive(Default)]
pub struct MockFrameSink {
    /// Transmitted frames in transmission order.
    pub frames: Vec<(UniverseId, Vec<u8>)>,
}

impl MockFrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames sent to the given universe.
    pub fn count_for(&self, universe: UniverseId) -> usize {
        self.frames.iter().filter(|(u, _)| *u == universe).count()
    }
}

impl FrameSink for MockFrameSink {
    fn send_frame(&mut self, universe: UniverseId, frame: &FrameData) -> io::Result<()> {
        self.frames.push((universe, frame.as_bytes().to_vec()));
        Ok(())
    }
}

/// [`FrameSink`] that fails after a configured number of sends.
pub struct FailingFrameSink {
    accept: usize,
    sent: usize,
}

impl FailingFrameSink {
    /// Accept `accept` frames, then fail every subsequent send.
    pub fn after(accept: usize) -> Self {
        Self { accept, sent: 0 }
    }
}

impl FrameSink for FailingFrameSink {
    fn send_frame(&mut self, _universe: UniverseId, _frame: &FrameData) -> io::Result<()> {
        if self.sent >= self.accept {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink failed"));
        }
        self.sent += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_shares_time_across_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance_ms(120);
        assert_eq!(clock.elapsed(), Duration::from_millis(120));
    }

    #[test]
    fn failing_sink_fails_after_budget() {
        let mut sink = FailingFrameSink::after(1);
        let frame = FrameData::new(vec![1]).unwrap();
        assert!(sink.send_frame(UniverseId(1), &frame).is_ok());
        assert!(sink.send_frame(UniverseId(1), &frame).is_err());
    }
}

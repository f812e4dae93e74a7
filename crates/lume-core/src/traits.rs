//! Collaborator traits implemented at the edges of the system.

use std::io;
use std::time::{Duration, Instant};

use crate::frame::FrameData;
use crate::id::UniverseId;

/// Accepts frames for transmission during playback.
///
/// Fire-and-forget from the engine's perspective: the player does not
/// wait for any acknowledgement before sleeping toward the next entry.
/// A send failure ends the run with the underlying I/O error.
pub trait FrameSink {
    /// Transmit one frame to the given universe.
    fn send_frame(&mut self, universe: UniverseId, frame: &FrameData) -> io::Result<()>;
}

/// A monotonic time source.
///
/// The recorder derives every `wait_delta` from differences between
/// [`elapsed`](Clock::elapsed) readings, so only monotonicity matters;
/// the epoch is whatever the implementation chooses. Tests substitute a
/// manually-advanced clock to make recorded deltas deterministic.
pub trait Clock {
    /// Time elapsed since the clock's epoch.
    fn elapsed(&self) -> Duration;
}

/// Wall [`Clock`] backed by [`Instant`], with its creation as the epoch.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose epoch is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

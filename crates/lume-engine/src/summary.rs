//! Post-run statistics shared by playback and verification.

use indexmap::IndexMap;
use log::warn;

use lume_core::UniverseId;
use lume_show::ShowError;

use crate::window::{PassStats, PlaybackWindow};

/// What a run processed: per-universe frame counts, timing, and the
/// error that truncated it, if any.
///
/// Both [`ShowPlayer`](crate::ShowPlayer) and
/// [`VerifyEngine`](crate::VerifyEngine) produce this type from the
/// same bookkeeping; any divergence between the two for an identical
/// file and window is a correctness bug.
#[derive(Debug, Default)]
pub struct PlaybackSummary {
    /// Frames counted per universe, keys in first-observed order,
    /// accumulated across passes.
    pub frames_by_universe: IndexMap<UniverseId, u64>,
    /// Windowed playback time of the final pass: the position reached
    /// minus `start_ms`, or 0 when the file ended before the start
    /// boundary.
    pub playback_time_ms: u64,
    /// Cumulative position reached by the final pass, before start
    /// trimming.
    pub show_length_ms: u64,
    /// Number of passes that ran (fully or partially).
    pub passes_completed: u64,
    /// The data or I/O error that ended the run, if any. Counters cover
    /// everything processed before the failure point.
    pub error: Option<ShowError>,
}

impl PlaybackSummary {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Total frames counted across all universes.
    pub fn total_frames(&self) -> u64 {
        self.frames_by_universe.values().sum()
    }

    /// Whether the run finished without a data or I/O error.
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }

    /// Fold one pass's counters into the running totals.
    ///
    /// Counts are kept per pass and merged here so the seed-frame clamp
    /// of a later pass can never reach back into an earlier pass's
    /// totals.
    pub(crate) fn absorb_pass(&mut self, stats: PassStats) {
        for (universe, count) in stats.counts {
            *self.frames_by_universe.entry(universe).or_insert(0) += count;
        }
        self.show_length_ms = stats.playback_pos;
    }

    /// Derive the final timing figures and log timing warnings.
    ///
    /// A file that ends before the requested start or stop boundary is
    /// advisory only — it never invalidates the run.
    pub(crate) fn finish(&mut self, window: &PlaybackWindow) {
        self.playback_time_ms = self.show_length_ms.saturating_sub(window.start_ms);
        if window.start_ms > self.show_length_ms {
            warn!(
                "show file ends before the start time (actual length {} ms)",
                self.show_length_ms
            );
        }
        if window.stop_ms > self.show_length_ms {
            warn!(
                "show file ends before the stop time (actual length {} ms)",
                self.show_length_ms
            );
        }
    }
}

//! Playback window configuration and the shared windowing routine.
//!
//! The routine in [`run_pass`] is the algorithmic core of the system:
//! it drives one pass over a show file, maintaining the running
//! playback position and per-universe frame counters, and applying the
//! start/stop trimming rules. It is parameterized by an [`Emitter`]
//! capability — the live player transmits and sleeps, the verifier does
//! neither — so the two paths can never disagree on the bookkeeping.

use std::fmt;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;

use lume_core::{FrameData, UniverseId};
use lume_show::{ShowError, ShowLoader};

// ── PlaybackWindow ──────────────────────────────────────────────

/// Governs which entries of a show are emitted and for how many passes.
///
/// Derived from invocation arguments, never stored in the file. A value
/// of 0 means "unbounded" for `stop_ms`, `iterations`, and
/// `duration_secs`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackWindow {
    /// Time in the show file to start playback from, in milliseconds.
    pub start_ms: u64,
    /// Time in the show file to stop playback at, in milliseconds.
    /// 0 = play to the natural end.
    pub stop_ms: u64,
    /// Number of passes over the file. 0 = repeat indefinitely.
    pub iterations: u32,
    /// Cap on cumulative elapsed real time across all passes, in
    /// seconds. 0 = uncapped. Ignored by verification.
    pub duration_secs: u64,
    /// Delay between successive passes, in milliseconds. Ignored by
    /// verification.
    pub inter_iteration_delay_ms: u64,
}

impl Default for PlaybackWindow {
    fn default() -> Self {
        Self {
            start_ms: 0,
            stop_ms: 0,
            iterations: 1,
            duration_secs: 0,
            inter_iteration_delay_ms: 0,
        }
    }
}

impl PlaybackWindow {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), WindowError> {
        if self.stop_ms > 0 && self.stop_ms < self.start_ms {
            return Err(WindowError::StopBeforeStart {
                start_ms: self.start_ms,
                stop_ms: self.stop_ms,
            });
        }
        Ok(())
    }
}

/// Errors detected during [`PlaybackWindow::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WindowError {
    /// The stop boundary precedes the start boundary.
    StopBeforeStart {
        /// Requested start time in milliseconds.
        start_ms: u64,
        /// Requested stop time in milliseconds.
        stop_ms: u64,
    },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StopBeforeStart { start_ms, stop_ms } => {
                write!(
                    f,
                    "stop time ({stop_ms} ms) must be later than start time ({start_ms} ms)"
                )
            }
        }
    }
}

impl std::error::Error for WindowError {}

// ── CancelHandle ────────────────────────────────────────────────

/// Thread-safe cancellation flag for a playback or verification run.
///
/// Clones share the flag. The owning engine checks it at every entry
/// boundary, so a run can be interrupted promptly mid-pass without
/// corrupting the statistics already accumulated.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Create a fresh, uncancelled handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe from any thread, idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

// ── Emitter capability ──────────────────────────────────────────

/// What [`run_pass`] does with a surviving entry.
pub(crate) enum EmitFlow {
    /// Keep processing entries.
    Continue,
    /// End the run (duration budget exhausted).
    Halt,
}

/// The emit capability separating live playback from dry-run
/// verification. All windowing decisions stay in [`run_pass`]; an
/// emitter only ever acts on the entries handed to it.
pub(crate) trait Emitter {
    /// An entry inside the fast-forward region (at or before the start
    /// boundary). The live emitter caches it as the universe's latest
    /// known frame; the dry-run emitter ignores it.
    fn fast_forward(&mut self, universe: UniverseId, frame: &FrameData) -> Result<(), ShowError>;

    /// The start boundary was just crossed. The live emitter transmits
    /// each universe's cached seed frame, in first-observed order.
    fn start_playing(&mut self) -> Result<EmitFlow, ShowError>;

    /// An entry past the start boundary. The live emitter sleeps the
    /// delta and transmits; the dry-run emitter does nothing.
    fn emit(
        &mut self,
        universe: UniverseId,
        frame: &FrameData,
        wait_delta_ms: u32,
    ) -> Result<EmitFlow, ShowError>;
}

// ── Pass bookkeeping ────────────────────────────────────────────

/// Counters accumulated over a single pass.
#[derive(Debug, Default)]
pub(crate) struct PassStats {
    /// Frames per universe, keys in first-observed order.
    pub counts: IndexMap<UniverseId, u64>,
    /// Cumulative milliseconds since the start of this pass.
    pub playback_pos: u64,
}

/// Why a pass ended.
#[derive(Debug)]
pub(crate) enum PassEnd {
    /// The file ran out cleanly.
    EndOfFile,
    /// The stop boundary was reached.
    StopBoundary,
    /// Cancellation was observed at an entry boundary.
    Cancelled,
    /// The emitter ended the run (duration budget exhausted).
    Halted,
    /// A decode or I/O failure ended the pass; the stats cover
    /// everything before the corruption point.
    Error(ShowError),
}

/// A finished pass: its statistics and how it ended.
pub(crate) struct PassOutcome {
    pub stats: PassStats,
    pub end: PassEnd,
}

// ── The windowing routine ───────────────────────────────────────

/// Drive one pass over `loader` under `window`, reporting through
/// `emitter`.
///
/// Per entry, in order: check cancellation, advance the playback
/// position by the entry's delta, enforce the stop boundary (clamping
/// the position to exactly `stop_ms` and dropping the crossing entry —
/// the reported time must be the requested boundary, not the
/// overshoot), count the frame, and route it by playback phase.
///
/// With a non-zero `start_ms` the pass begins fast-forwarding: entries
/// are counted and cached but not played. The first position strictly
/// past `start_ms` triggers the start transition exactly once: every
/// universe's counter is clamped to at most 1, because skipped history
/// collapses into the single most-recent "seed" frame a device needs to
/// be primed with. The entry that crossed the boundary is absorbed into
/// the seed set rather than played separately. With `start_ms == 0`
/// playback is live from the first entry and no clamp ever applies.
pub(crate) fn run_pass<R: Read>(
    loader: &mut ShowLoader<R>,
    window: &PlaybackWindow,
    emitter: &mut dyn Emitter,
    cancel: &CancelHandle,
) -> PassOutcome {
    let mut stats = PassStats::default();
    let mut playing = window.start_ms == 0;

    let end = loop {
        if cancel.is_cancelled() {
            break PassEnd::Cancelled;
        }

        let entry = match loader.next_entry() {
            Ok(Some(entry)) => entry,
            Ok(None) => break PassEnd::EndOfFile,
            Err(e) => break PassEnd::Error(e),
        };

        stats.playback_pos += u64::from(entry.wait_delta_ms);

        if window.stop_ms > 0 && stats.playback_pos >= window.stop_ms {
            stats.playback_pos = window.stop_ms;
            break PassEnd::StopBoundary;
        }

        *stats.counts.entry(entry.universe).or_insert(0) += 1;

        if !playing {
            if let Err(e) = emitter.fast_forward(entry.universe, &entry.frame) {
                break PassEnd::Error(e);
            }
            if stats.playback_pos > window.start_ms {
                playing = true;
                clamp_seed_counts(&mut stats.counts);
                match emitter.start_playing() {
                    Ok(EmitFlow::Continue) => {}
                    Ok(EmitFlow::Halt) => break PassEnd::Halted,
                    Err(e) => break PassEnd::Error(e),
                }
            }
        } else {
            match emitter.emit(entry.universe, &entry.frame, entry.wait_delta_ms) {
                Ok(EmitFlow::Continue) => {}
                Ok(EmitFlow::Halt) => break PassEnd::Halted,
                Err(e) => break PassEnd::Error(e),
            }
        }
    };

    PassOutcome { stats, end }
}

/// Collapse fast-forwarded history: each universe keeps at most one
/// counted frame, the seed it would be primed with.
fn clamp_seed_counts(counts: &mut IndexMap<UniverseId, u64>) {
    for count in counts.values_mut() {
        if *count > 1 {
            *count = 1;
        }
    }
}

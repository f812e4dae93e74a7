//! Live show playback.
//!
//! [`ShowPlayer`] walks a show file through the shared windowing
//! routine with a live emitter: surviving entries are transmitted to a
//! [`FrameSink`] at their recorded wall-clock offsets, and skipped
//! history is collapsed into one seed frame per universe when playback
//! engages mid-file.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use log::{debug, info};

use lume_core::{FrameData, FrameSink, UniverseId};
use lume_show::{ShowError, ShowLoader};

use crate::summary::PlaybackSummary;
use crate::window::{run_pass, CancelHandle, EmitFlow, Emitter, PassEnd, PlaybackWindow, WindowError};

// ── PlayError ───────────────────────────────────────────────────

/// Errors preparing a playback run.
#[derive(Debug)]
pub enum PlayError {
    /// The playback window is structurally invalid.
    Window(WindowError),
    /// The show file could not be opened or is not a show file.
    Show(ShowError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window(e) => write!(f, "{e}"),
            Self::Show(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Window(e) => Some(e),
            Self::Show(e) => Some(e),
        }
    }
}

impl From<WindowError> for PlayError {
    fn from(e: WindowError) -> Self {
        Self::Window(e)
    }
}

impl From<ShowError> for PlayError {
    fn from(e: ShowError) -> Self {
        Self::Show(e)
    }
}

// ── ShowPlayer ──────────────────────────────────────────────────

/// Replays a show file against a transport sink.
///
/// [`init`](Self::init) validates the window and opens the file, so
/// input errors surface before any playback; [`playback`](Self::playback)
/// then runs the configured passes, re-opening the file between passes
/// and honoring the iteration count, inter-iteration delay, duration
/// cap, and cancellation.
pub struct ShowPlayer {
    path: PathBuf,
    window: PlaybackWindow,
    cancel: CancelHandle,
    loader: Option<ShowLoader<BufReader<File>>>,
}

impl ShowPlayer {
    /// Create a player for `path` under `window`.
    pub fn new(path: impl Into<PathBuf>, window: PlaybackWindow) -> Self {
        Self {
            path: path.into(),
            window,
            cancel: CancelHandle::new(),
            loader: None,
        }
    }

    /// Validate the window and open the show file.
    pub fn init(&mut self) -> Result<(), PlayError> {
        self.window.validate()?;
        self.loader = Some(ShowLoader::open(&self.path)?);
        Ok(())
    }

    /// A handle that interrupts playback at the next entry boundary.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Run the configured passes, emitting frames to `sink`.
    ///
    /// Runtime failures (corrupt data mid-scan, a failing sink) are
    /// carried inside the returned summary so the statistics
    /// accumulated before the failure survive.
    pub fn playback(&mut self, sink: &mut dyn FrameSink) -> PlaybackSummary {
        let mut summary = PlaybackSummary::new();

        let deadline = (self.window.duration_secs > 0)
            .then(|| Instant::now() + Duration::from_secs(self.window.duration_secs));

        let mut loader = match self.loader.take() {
            Some(loader) => loader,
            None => match ShowLoader::open(&self.path) {
                Ok(loader) => loader,
                Err(e) => {
                    summary.error = Some(e);
                    summary.finish(&self.window);
                    return summary;
                }
            },
        };

        let mut pass_index: u32 = 0;
        loop {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                debug!("duration cap reached before pass {}", pass_index + 1);
                break;
            }

            let mut emitter = LiveEmitter {
                sink: &mut *sink,
                deadline,
                seeds: IndexMap::new(),
            };
            let outcome = run_pass(&mut loader, &self.window, &mut emitter, &self.cancel);
            summary.absorb_pass(outcome.stats);
            summary.passes_completed += 1;
            pass_index += 1;

            match outcome.end {
                PassEnd::EndOfFile | PassEnd::StopBoundary => {}
                PassEnd::Cancelled => {
                    info!("playback cancelled during pass {pass_index}");
                    break;
                }
                PassEnd::Halted => {
                    debug!("duration cap reached during pass {pass_index}");
                    break;
                }
                PassEnd::Error(e) => {
                    summary.error = Some(e);
                    break;
                }
            }

            let more_passes = self.window.iterations == 0 || pass_index < self.window.iterations;
            if !more_passes {
                break;
            }

            if self.window.inter_iteration_delay_ms > 0 {
                let delay = Duration::from_millis(self.window.inter_iteration_delay_ms);
                if let SleepOutcome::DeadlineHit = bounded_sleep(delay, deadline) {
                    break;
                }
            }

            // Rewind for the next pass by re-opening the file.
            match ShowLoader::open(&self.path) {
                Ok(next) => loader = next,
                Err(e) => {
                    summary.error = Some(e);
                    break;
                }
            }
        }

        summary.finish(&self.window);
        info!(
            "playback finished: {} frame(s) over {} pass(es)",
            summary.total_frames(),
            summary.passes_completed
        );
        summary
    }
}

// ── Live emitter ────────────────────────────────────────────────

/// Real-time emit capability: caches seed frames during fast-forward,
/// then transmits with inter-entry sleeps bounded by the duration
/// deadline.
struct LiveEmitter<'a> {
    sink: &'a mut dyn FrameSink,
    deadline: Option<Instant>,
    /// Latest known frame per fast-forwarded universe, in
    /// first-observed order.
    seeds: IndexMap<UniverseId, FrameData>,
}

impl Emitter for LiveEmitter<'_> {
    fn fast_forward(&mut self, universe: UniverseId, frame: &FrameData) -> Result<(), ShowError> {
        self.seeds.insert(universe, frame.clone());
        Ok(())
    }

    fn start_playing(&mut self) -> Result<EmitFlow, ShowError> {
        // Prime each universe with its most recent skipped frame so a
        // device joining mid-file starts from the correct state.
        for (universe, frame) in std::mem::take(&mut self.seeds) {
            self.sink.send_frame(universe, &frame)?;
        }
        Ok(EmitFlow::Continue)
    }

    fn emit(
        &mut self,
        universe: UniverseId,
        frame: &FrameData,
        wait_delta_ms: u32,
    ) -> Result<EmitFlow, ShowError> {
        let wait = Duration::from_millis(u64::from(wait_delta_ms));
        if let SleepOutcome::DeadlineHit = bounded_sleep(wait, self.deadline) {
            return Ok(EmitFlow::Halt);
        }
        self.sink.send_frame(universe, frame)?;
        Ok(EmitFlow::Continue)
    }
}

// ── Deadline-bounded sleeping ───────────────────────────────────

enum SleepOutcome {
    Completed,
    DeadlineHit,
}

/// Sleep for `wait`, truncated at the duration deadline. When the
/// deadline lands inside the wait, sleep up to it and report the hit so
/// the run stops at the requested duration rather than overshooting.
fn bounded_sleep(wait: Duration, deadline: Option<Instant>) -> SleepOutcome {
    let Some(deadline) = deadline else {
        thread::sleep(wait);
        return SleepOutcome::Completed;
    };
    let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
        return SleepOutcome::DeadlineHit;
    };
    if wait >= remaining {
        thread::sleep(remaining);
        return SleepOutcome::DeadlineHit;
    }
    thread::sleep(wait);
    SleepOutcome::Completed
}

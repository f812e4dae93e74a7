//! Dry-run playback for show file validation.
//!
//! [`VerifyEngine`] consumes a loader exactly as the player would —
//! same windowing, same counters, same start/stop rules — but never
//! transmits and never sleeps, so a file can be audited without
//! hardware or wall-clock time.

use std::io::Read;

use lume_core::{FrameData, UniverseId};
use lume_show::{ShowError, ShowLoader};

use crate::summary::PlaybackSummary;
use crate::window::{run_pass, CancelHandle, EmitFlow, Emitter, PassEnd, PlaybackWindow, WindowError};

/// Validates a show file and reports the statistics a real playback of
/// the same window would produce.
///
/// Only `start_ms` and `stop_ms` of the window apply; iteration,
/// duration, and delay control are real-time concerns and a
/// verification run is a single dry pass.
pub struct VerifyEngine {
    window: PlaybackWindow,
    cancel: CancelHandle,
}

impl VerifyEngine {
    /// Create a verifier, validating the window.
    pub fn new(window: PlaybackWindow) -> Result<Self, WindowError> {
        window.validate()?;
        Ok(Self {
            window,
            cancel: CancelHandle::new(),
        })
    }

    /// A handle that interrupts the scan at the next entry boundary.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Scan the file once, accumulating statistics.
    ///
    /// A data error mid-scan is carried inside the summary alongside
    /// everything counted up to the corruption point; nothing past it
    /// is fabricated.
    pub fn run<R: Read>(&self, loader: &mut ShowLoader<R>) -> PlaybackSummary {
        let mut summary = PlaybackSummary::new();
        let outcome = run_pass(loader, &self.window, &mut DryRunEmitter, &self.cancel);
        summary.absorb_pass(outcome.stats);
        summary.passes_completed = 1;
        if let PassEnd::Error(e) = outcome.end {
            summary.error = Some(e);
        }
        summary.finish(&self.window);
        summary
    }
}

/// Emit capability that does nothing: verification is pure counting.
pub(crate) struct DryRunEmitter;

impl Emitter for DryRunEmitter {
    fn fast_forward(&mut self, _: UniverseId, _: &FrameData) -> Result<(), ShowError> {
        Ok(())
    }

    fn start_playing(&mut self) -> Result<EmitFlow, ShowError> {
        Ok(EmitFlow::Continue)
    }

    fn emit(&mut self, _: UniverseId, _: &FrameData, _: u32) -> Result<EmitFlow, ShowError> {
        Ok(EmitFlow::Continue)
    }
}

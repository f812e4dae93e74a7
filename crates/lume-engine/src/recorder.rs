//! Event-driven show capture.
//!
//! [`ShowRecorder`] owns the write handle to a new show file and a
//! channel of frame-change events. The capture loop blocks on the
//! channel; a [`StopHandle`] wakes it from any other thread by sending
//! a stop message through the same channel, so shutdown never depends
//! on another frame arriving.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use log::{debug, info};

use lume_core::{Clock, FrameData, MonotonicClock, UniverseId};
use lume_show::{ShowEntry, ShowError, ShowWriter};

// ── Capture channel ─────────────────────────────────────────────

/// One message on the capture channel.
enum CaptureEvent {
    /// A universe's frame changed. `at` is the arrival time, stamped by
    /// the sending side so a stalled capture loop cannot distort
    /// inter-event deltas.
    Update {
        universe: UniverseId,
        frame: FrameData,
        at: Duration,
    },
    /// Wake the capture loop and end recording.
    Stop,
}

/// Cloneable sending side of the capture channel.
///
/// Handed to the frame-update source at subscription time; every
/// frame-change notification flows through here.
#[derive(Clone)]
pub struct UpdateSender {
    tx: Sender<CaptureEvent>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl UpdateSender {
    /// Deliver one frame-change notification.
    ///
    /// Returns `false` when the recorder has gone away; sources should
    /// stop delivering at that point.
    pub fn send_update(&self, universe: UniverseId, frame: FrameData) -> bool {
        let at = self.clock.elapsed();
        self.tx
            .send(CaptureEvent::Update {
                universe,
                frame,
                at,
            })
            .is_ok()
    }
}

/// Delivers `(universe, frame)` change notifications to a recorder.
///
/// Contract: at-least-once delivery per actual device change, no
/// ordering guarantee across different universes; arrival order on the
/// capture channel becomes the global timeline order.
pub trait FrameSource {
    /// Begin delivering notifications for the given universes into
    /// `updates`. Failing here aborts recording before any capture.
    fn subscribe(&mut self, universes: &[UniverseId], updates: UpdateSender) -> io::Result<()>;
}

// ── StopHandle ──────────────────────────────────────────────────

/// Ends a blocked [`ShowRecorder::record`] call from any thread.
///
/// Sets the stop flag and pushes a wakeup message through the capture
/// channel, so the capture loop observes the stop deterministically —
/// no missed-wakeup races, no dependency on a further frame change.
/// Idempotent; safe to invoke before `record()` ever runs.
#[derive(Clone)]
pub struct StopHandle {
    tx: Sender<CaptureEvent>,
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request that recording end promptly.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
        // Send may fail only when the recorder is already gone.
        let _ = self.tx.send(CaptureEvent::Stop);
    }
}

// ── RecordError ─────────────────────────────────────────────────

/// Errors from the capture loop.
#[derive(Debug)]
pub enum RecordError {
    /// `record()` was called before a successful `init()`.
    Uninitialized,
    /// Writing the show file failed.
    Show(ShowError),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "recorder not initialised; call init() first"),
            Self::Show(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Show(e) => Some(e),
            Self::Uninitialized => None,
        }
    }
}

impl From<ShowError> for RecordError {
    fn from(e: ShowError) -> Self {
        Self::Show(e)
    }
}

// ── ShowRecorder ────────────────────────────────────────────────

/// Captures live frame-change events for a set of universes and
/// appends them to a new show file with correct inter-event timing.
///
/// Lifecycle: [`init`](Self::init) opens the destination and
/// subscribes to the update source; [`record`](Self::record) blocks in
/// the capture loop until a [`StopHandle`] fires;
/// [`frame_count`](Self::frame_count) is valid at any point, including
/// concurrently with the capture loop.
///
/// The first recorded event gets a delta of 0; every later event's
/// delta is the time since the previous recorded event's arrival,
/// whichever universe it came from, merging all universes onto one
/// global clock.
pub struct ShowRecorder {
    path: PathBuf,
    universes: Vec<UniverseId>,
    clock: Arc<dyn Clock + Send + Sync>,
    tx: Sender<CaptureEvent>,
    rx: Receiver<CaptureEvent>,
    writer: Option<ShowWriter<BufWriter<File>>>,
    frame_count: Arc<AtomicU64>,
    stopped: Arc<AtomicBool>,
}

impl ShowRecorder {
    /// Create a recorder for `universes` writing to `path`, timed by
    /// the wall clock.
    pub fn new(path: impl Into<PathBuf>, universes: Vec<UniverseId>) -> Self {
        Self::with_clock(path, universes, MonotonicClock::new())
    }

    /// Create a recorder with an explicit clock (tests inject a manual
    /// one to make recorded deltas deterministic).
    pub fn with_clock(
        path: impl Into<PathBuf>,
        universes: Vec<UniverseId>,
        clock: impl Clock + Send + Sync + 'static,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            path: path.into(),
            universes,
            clock: Arc::new(clock),
            tx,
            rx,
            writer: None,
            frame_count: Arc::new(AtomicU64::new(0)),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Open the destination file and subscribe to the update source.
    ///
    /// Fails with the underlying I/O error when the destination cannot
    /// be created or the source refuses the subscription; either way no
    /// capture begins.
    pub fn init(&mut self, source: &mut dyn FrameSource) -> Result<(), ShowError> {
        let file = File::create(&self.path)?;
        self.writer = Some(ShowWriter::new(BufWriter::new(file))?);
        source.subscribe(&self.universes, self.update_sender())?;
        info!(
            "recording {} universe(s) to {}",
            self.universes.len(),
            self.path.display()
        );
        Ok(())
    }

    /// The sending side of the capture channel.
    pub fn update_sender(&self) -> UpdateSender {
        UpdateSender {
            tx: self.tx.clone(),
            clock: Arc::clone(&self.clock),
        }
    }

    /// A handle that ends [`record`](Self::record) from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.tx.clone(),
            stopped: Arc::clone(&self.stopped),
        }
    }

    /// Run the blocking capture loop until stopped.
    ///
    /// Returns promptly after [`StopHandle::stop`], even when no frame
    /// ever arrived. The file is flushed before returning.
    pub fn record(&mut self) -> Result<(), RecordError> {
        let writer = self.writer.as_mut().ok_or(RecordError::Uninitialized)?;
        let mut last_at: Option<Duration> = None;

        loop {
            if self.stopped.load(Ordering::Acquire) {
                break;
            }
            match self.rx.recv() {
                Ok(CaptureEvent::Update {
                    universe,
                    frame,
                    at,
                }) => {
                    if !self.universes.contains(&universe) {
                        debug!("ignoring update for unconfigured universe {universe}");
                        continue;
                    }
                    let wait_delta_ms = match last_at {
                        Some(prev) => delta_ms(prev, at),
                        None => 0,
                    };
                    last_at = Some(at);
                    writer.append(&ShowEntry {
                        universe,
                        wait_delta_ms,
                        frame,
                    })?;
                    self.frame_count.fetch_add(1, Ordering::Relaxed);
                }
                Ok(CaptureEvent::Stop) | Err(_) => break,
            }
        }

        writer.flush()?;
        info!(
            "capture finished with {} frame(s)",
            self.frame_count.load(Ordering::Relaxed)
        );
        Ok(())
    }

    /// Total entries written so far. Safe to call concurrently with the
    /// capture loop and after it returns.
    pub fn frame_count(&self) -> u64 {
        self.frame_count.load(Ordering::Relaxed)
    }

    /// The destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Millisecond delta between two arrival times, saturating on the
/// (pathological) u32 overflow.
fn delta_ms(prev: Duration, now: Duration) -> u32 {
    let ms = now.saturating_sub(prev).as_millis();
    u32::try_from(ms).unwrap_or(u32::MAX)
}

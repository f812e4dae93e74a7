//! The stored entry type.

use lume_core::{FrameData, UniverseId};

/// One recorded event: a frame for one universe at one point in time.
///
/// `wait_delta_ms` is the time elapsed since the *previous entry in the
/// file*, whichever universe it belonged to — a single shared global
/// clock, not one clock per universe. The cumulative sum of deltas over
/// a prefix of entries is the elapsed time since the recording began,
/// which keeps the format append-friendly and portable across machines
/// with different clock epochs.
///
/// # Examples
///
/// ```
/// use lume_core::{FrameData, UniverseId};
/// use lume_show::ShowEntry;
///
/// let entry = ShowEntry {
///     universe: UniverseId(1),
///     wait_delta_ms: 50,
///     frame: FrameData::new(vec![0xff; 8]).unwrap(),
/// };
/// assert_eq!(entry.frame.len(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowEntry {
    /// The universe this frame targets.
    pub universe: UniverseId,
    /// Milliseconds since the previous entry in the file.
    pub wait_delta_ms: u32,
    /// The control values at this point in time.
    pub frame: FrameData,
}

//! End-to-end windowing scenarios: the canonical two-universe show,
//! equivalence between verification and live playback, and the
//! record → load → verify round trip.

use proptest::prelude::*;

use lume_core::{FrameData, UniverseId};
use lume_engine::{PlaybackWindow, ShowPlayer, ShowRecorder, VerifyEngine};
use lume_show::ShowLoader;
use lume_test_utils::{encode_show, write_show_file, ManualClock, MockFrameSink};

mod support {
    use lume_core::UniverseId;
    use lume_engine::{FrameSource, UpdateSender};
    use std::io;

    /// Source that accepts the subscription and discards the sender;
    /// tests drive updates through `ShowRecorder::update_sender`.
    pub struct NullSource;

    impl FrameSource for NullSource {
        fn subscribe(&mut self, _: &[UniverseId], _: UpdateSender) -> io::Result<()> {
            Ok(())
        }
    }
}

/// Universe 1 updating at 0 and 50 ms, universe 2 at 120 ms.
fn canonical_show() -> Vec<u8> {
    encode_show(&[(1, 0, &[0x0a]), (1, 50, &[0x0b]), (2, 70, &[0x0c])])
}

fn verify_window(bytes: &[u8], window: PlaybackWindow) -> lume_engine::PlaybackSummary {
    let engine = VerifyEngine::new(window).unwrap();
    let mut loader = ShowLoader::new(bytes).unwrap();
    engine.run(&mut loader)
}

// ── Canonical scenarios ─────────────────────────────────────────

#[test]
fn full_scan_counts_every_frame() {
    let summary = verify_window(&canonical_show(), PlaybackWindow::default());
    assert_eq!(summary.frames_by_universe[&UniverseId(1)], 2);
    assert_eq!(summary.frames_by_universe[&UniverseId(2)], 1);
    assert_eq!(summary.total_frames(), 3);
    assert_eq!(summary.playback_time_ms, 120);
}

#[test]
fn start_at_60_collapses_skipped_history() {
    let window = PlaybackWindow {
        start_ms: 60,
        ..PlaybackWindow::default()
    };
    let summary = verify_window(&canonical_show(), window);
    assert_eq!(summary.frames_by_universe[&UniverseId(1)], 1);
    assert_eq!(summary.frames_by_universe[&UniverseId(2)], 1);
    assert_eq!(summary.total_frames(), 2);
}

#[test]
fn stop_at_40_reports_exactly_the_boundary() {
    let window = PlaybackWindow {
        stop_ms: 40,
        ..PlaybackWindow::default()
    };
    let summary = verify_window(&canonical_show(), window);
    assert_eq!(summary.frames_by_universe[&UniverseId(1)], 1);
    assert_eq!(summary.total_frames(), 1);
    assert_eq!(summary.playback_time_ms, 40);
}

// ── Verification ≡ live playback ────────────────────────────────

#[test]
fn verify_matches_live_playback_across_windows() {
    let windows = [
        PlaybackWindow::default(),
        PlaybackWindow {
            start_ms: 60,
            ..PlaybackWindow::default()
        },
        PlaybackWindow {
            stop_ms: 40,
            ..PlaybackWindow::default()
        },
        PlaybackWindow {
            start_ms: 30,
            stop_ms: 100,
            ..PlaybackWindow::default()
        },
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("canonical.lume");
    write_show_file(&path, &[(1, 0, &[0x0a]), (1, 50, &[0x0b]), (2, 70, &[0x0c])]);

    for window in windows {
        let dry = verify_window(&canonical_show(), window.clone());

        let mut player = ShowPlayer::new(&path, window.clone());
        player.init().unwrap();
        let mut sink = MockFrameSink::new();
        let live = player.playback(&mut sink);

        assert!(dry.is_clean() && live.is_clean());
        assert_eq!(
            dry.frames_by_universe, live.frames_by_universe,
            "count divergence for window {window:?}"
        );
        assert_eq!(
            dry.playback_time_ms, live.playback_time_ms,
            "time divergence for window {window:?}"
        );
        // Every counted frame of a windowed run is also transmitted.
        assert_eq!(sink.frames.len() as u64, live.total_frames());
    }
}

// ── Record → load → verify round trip ───────────────────────────

#[test]
fn recorded_session_verifies_with_canonical_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.lume");

    let clock = ManualClock::new();
    let mut recorder = ShowRecorder::with_clock(
        &path,
        vec![UniverseId(1), UniverseId(2)],
        clock.clone(),
    );
    recorder.init(&mut support::NullSource).unwrap();

    let updates = recorder.update_sender();
    updates.send_update(UniverseId(1), FrameData::new(vec![0x0a]).unwrap());
    clock.advance_ms(50);
    updates.send_update(UniverseId(1), FrameData::new(vec![0x0b]).unwrap());
    clock.advance_ms(70);
    updates.send_update(UniverseId(2), FrameData::new(vec![0x0c]).unwrap());
    recorder.stop_handle().stop();
    recorder.record().unwrap();
    assert_eq!(recorder.frame_count(), 3);

    // Read back: same universes, same deltas, same payloads, same order.
    let mut loader = ShowLoader::open(&path).unwrap();
    let entries: Vec<_> = std::iter::from_fn(|| loader.next_entry().unwrap()).collect();
    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries
            .iter()
            .map(|e| (e.universe.0, e.wait_delta_ms, e.frame.as_bytes().to_vec()))
            .collect::<Vec<_>>(),
        vec![
            (1, 0, vec![0x0a]),
            (1, 50, vec![0x0b]),
            (2, 70, vec![0x0c]),
        ]
    );

    // And the dry-run scan reports the canonical numbers.
    let engine = VerifyEngine::new(PlaybackWindow::default()).unwrap();
    let mut loader = ShowLoader::open(&path).unwrap();
    let summary = engine.run(&mut loader);
    assert_eq!(summary.total_frames(), 3);
    assert_eq!(summary.playback_time_ms, 120);
}

// ── Seed-frame clamp property ───────────────────────────────────

proptest! {
    /// Any prefix of universe-1 entries whose cumulative time stays at
    /// or before the start boundary collapses to at most one counted
    /// frame once playback engages, no matter how long the prefix.
    #[test]
    fn seed_clamp_bounds_fast_forwarded_counts(
        deltas in prop::collection::vec(0u32..10, 1..20),
        headroom in 0u64..50,
        crossing_delta in 1u32..20,
    ) {
        let prefix_len: u64 = deltas.iter().map(|&d| u64::from(d)).sum();
        let start_ms = prefix_len + headroom;
        prop_assume!(start_ms > 0);

        let mut entries: Vec<(u32, u32, &[u8])> =
            deltas.iter().map(|&d| (1u32, d, &[0x01][..])).collect();
        // One entry strictly past the start boundary triggers the
        // transition.
        let trigger = u32::try_from(headroom).unwrap() + crossing_delta;
        entries.push((2, trigger, &[0x02][..]));

        let bytes = encode_show(&entries);
        let window = PlaybackWindow { start_ms, ..PlaybackWindow::default() };
        let summary = verify_window(&bytes, window);

        prop_assert_eq!(summary.frames_by_universe[&UniverseId(1)], 1);
        prop_assert_eq!(summary.frames_by_universe[&UniverseId(2)], 1);
        prop_assert_eq!(
            summary.playback_time_ms,
            prefix_len + u64::from(trigger) - start_ms
        );
    }
}

//! Show-file fixture builders.

use std::path::Path;

use lume_core::{FrameData, UniverseId};
use lume_show::{ShowEntry, ShowWriter};

/// Encode a show byte stream from `(universe, wait_delta_ms, payload)`
/// tuples.
///
/// The canonical three-entry fixture used across the engine suites is
/// `[(1, 0, ..), (1, 50, ..), (2, 70, ..)]`: two universes updating at
/// absolute times 0, 50, and 120 ms.
pub fn encode_show(entries: &[(u32, u32, &[u8])]) -> Vec<u8> {
    let mut writer = ShowWriter::new(Vec::new()).expect("header write to Vec cannot fail");
    for &(universe, delta, payload) in entries {
        writer
            .append(&ShowEntry {
                universe: UniverseId(universe),
                wait_delta_ms: delta,
                frame: FrameData::new(payload.to_vec()).expect("fixture payload within bounds"),
            })
            .expect("entry write to Vec cannot fail");
    }
    writer.into_inner()
}

/// Write a show file at `path` from the same tuple shape.
pub fn write_show_file(path: &Path, entries: &[(u32, u32, &[u8])]) {
    std::fs::write(path, encode_show(entries)).expect("fixture file write");
}

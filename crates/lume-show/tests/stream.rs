//! On-disk streaming tests: write a show file with `ShowWriter`, read it
//! back through `ShowLoader::open`, and exercise the terminal states a
//! real file can reach.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use lume_core::{FrameData, UniverseId};
use lume_show::{ShowEntry, ShowError, ShowLoader, ShowWriter};

fn entry(universe: u32, delta: u32, payload: &[u8]) -> ShowEntry {
    ShowEntry {
        universe: UniverseId(universe),
        wait_delta_ms: delta,
        frame: FrameData::new(payload.to_vec()).unwrap(),
    }
}

#[test]
fn disk_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two-universes.lume");

    let entries = [
        entry(1, 0, &[0x10, 0x20]),
        entry(1, 50, &[0x30]),
        entry(2, 70, &[0x40, 0x50, 0x60]),
    ];

    let file = File::create(&path).unwrap();
    let mut writer = ShowWriter::new(BufWriter::new(file)).unwrap();
    for e in &entries {
        writer.append(e).unwrap();
    }
    writer.flush().unwrap();
    drop(writer);

    let mut loader = ShowLoader::open(&path).unwrap();
    for expected in &entries {
        let got = loader.next_entry().unwrap().unwrap();
        assert_eq!(&got, expected);
    }
    assert!(loader.next_entry().unwrap().is_none());
    assert_eq!(loader.entries_read(), 3);
}

#[test]
fn empty_recording_is_a_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.lume");

    let file = File::create(&path).unwrap();
    let writer = ShowWriter::new(BufWriter::new(file)).unwrap();
    let mut inner = writer.into_inner();
    inner.flush().unwrap();
    drop(inner);

    let mut loader = ShowLoader::open(&path).unwrap();
    assert!(loader.next_entry().unwrap().is_none());
}

#[test]
fn corrupt_tail_surfaces_after_valid_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.lume");

    let file = File::create(&path).unwrap();
    let mut writer = ShowWriter::new(BufWriter::new(file)).unwrap();
    writer.append(&entry(1, 0, &[1, 2, 3])).unwrap();
    writer.flush().unwrap();
    drop(writer);

    // Append garbage that starts like an entry but ends mid-field.
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(&[0xAB, 0xCD]).unwrap();
    drop(file);

    let mut loader = ShowLoader::open(&path).unwrap();
    assert!(loader.next_entry().unwrap().is_some());
    let err = loader.next_entry().unwrap_err();
    assert!(matches!(err, ShowError::MalformedEntry { .. }));
    assert!(err.is_data_error());
    // Entries before the corruption point remain accounted for.
    assert_eq!(loader.entries_read(), 1);
}

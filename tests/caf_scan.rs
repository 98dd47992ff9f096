use base64::{Engine, engine::general_purpose::STANDARD};
use cafmeta::{
    caf::{METADATA_UUID, ScanOptions, scan, scan_with},
    metadata::{
        KEY_SIGNATURE, MIDI_DATA_BASE64, TEMPO, TEMPO_SEQUENCE, TIME_SIGNATURE,
        TIME_SIGNATURE_SEQUENCE,
    },
};
use pretty_assertions::assert_eq;
use std::io::{Cursor, Seek, SeekFrom, Write};

fn chunk(code: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = code.to_vec();
    out.extend((payload.len() as i64).to_be_bytes());
    out.extend(payload);
    out
}

fn strings(pairs: &[(&str, &str)]) -> Vec<u8> {
    let mut out = (pairs.len() as u32).to_be_bytes().to_vec();
    for (key, value) in pairs {
        out.extend(key.as_bytes());
        out.push(0);
        out.extend(value.as_bytes());
        out.push(0);
    }
    out
}

fn info(pairs: &[(&str, &str)]) -> Vec<u8> {
    chunk(b"info", &strings(pairs))
}

fn tagged_uuid(pairs: &[(&str, &str)]) -> Vec<u8> {
    let mut payload = METADATA_UUID.to_vec();
    payload.extend(strings(pairs));
    chunk(b"uuid", &payload)
}

/// Format 0, 480 ticks per quarter: 120 bpm in 4/4 and C major, then 240 bpm at tick 960
fn midi_file() -> Vec<u8> {
    let track = [
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo 500000
        0x00, 0xFF, 0x58, 0x04, 0x04, 0x02, 0x18, 0x08, // 4/4
        0x00, 0xFF, 0x59, 0x02, 0x00, 0x00, // C major
        0x87, 0x40, 0xFF, 0x51, 0x03, 0x03, 0xD0, 0x90, // tempo 250000
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let mut out = b"MThd".to_vec();
    out.extend([0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0]);
    out.extend(b"MTrk");
    out.extend((track.len() as u32).to_be_bytes());
    out.extend(track);
    out
}

fn caf(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"caff\0\x01\0\0".to_vec();
    for chunk in chunks {
        out.extend(chunk);
    }
    out
}

#[test]
fn collects_every_metadata_chunk() {
    let midi = midi_file();
    let bytes = caf(&[
        info(&[("artist", "Someone"), ("title", "Draft")]),
        chunk(b"free", &[0; 32]),
        tagged_uuid(&[("title", "Final")]),
        chunk(b"midi", &midi),
    ]);
    let scan = scan(&mut Cursor::new(bytes)).unwrap();

    assert!(scan.recognized);
    let metadata = scan.metadata;
    assert_eq!(metadata.get("artist"), Some("Someone"));
    assert_eq!(metadata.get("title"), Some("Final"));
    assert_eq!(metadata.get(TEMPO), Some("120"));
    assert_eq!(metadata.get(TEMPO_SEQUENCE), Some("120,0;240,960;"));
    assert_eq!(metadata.get(TIME_SIGNATURE), Some("4/4"));
    assert_eq!(metadata.get(TIME_SIGNATURE_SEQUENCE), None);
    assert_eq!(metadata.get(KEY_SIGNATURE), Some("C"));

    let encoded = metadata.get(MIDI_DATA_BASE64).unwrap();
    assert_eq!(STANDARD.decode(encoded).unwrap(), midi);
}

#[test]
fn open_ended_data_halts_the_walk() {
    let mut bytes = caf(&[info(&[("before", "yes")])]);
    bytes.extend(b"data");
    bytes.extend((-1i64).to_be_bytes());
    bytes.extend(0u32.to_be_bytes());
    // looks like a chunk, but it is sample data
    bytes.extend(info(&[("after", "yes")]));

    let scan = scan(&mut Cursor::new(bytes)).unwrap();
    let entries: Vec<_> = scan.metadata.iter().collect();
    assert_eq!(entries, vec![("before", "yes")]);
}

#[test]
fn other_negative_sizes_halt_the_walk() {
    let mut bytes = caf(&[info(&[("before", "yes")])]);
    bytes.extend(b"free");
    bytes.extend((-12i64).to_be_bytes());
    bytes.extend(info(&[("after", "yes")]));

    let scan = scan(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(scan.metadata.len(), 1);
    assert!(!scan.metadata.contains_key("after"));
}

#[test]
fn scanning_is_repeatable_and_restores_position() {
    let mut bytes = b"junk before the file".to_vec();
    let start = bytes.len() as u64;
    bytes.extend(caf(&[info(&[("k", "v")]), chunk(b"midi", &midi_file())]));

    let mut stream = Cursor::new(bytes);
    stream.seek(SeekFrom::Start(start)).unwrap();

    let first = scan(&mut stream).unwrap();
    assert_eq!(stream.position(), start);
    let second = scan(&mut stream).unwrap();
    assert_eq!(stream.position(), start);

    assert!(first.recognized);
    assert_eq!(first, second);
}

#[test]
fn truncated_file_keeps_earlier_metadata() {
    let mut bytes = caf(&[info(&[("title", "Song")])]);
    bytes.extend(b"midi");
    bytes.extend(1_000i64.to_be_bytes());
    bytes.extend(&midi_file()[..20]);

    let mut stream = Cursor::new(bytes);
    let scan = scan(&mut stream).unwrap();
    assert!(scan.recognized);
    assert_eq!(scan.metadata.get("title"), Some("Song"));
    assert!(!scan.metadata.contains_key(TEMPO));
    assert_eq!(stream.position(), 0);
}

#[test]
fn oversized_chunk_in_a_file_keeps_earlier_metadata() {
    let mut bytes = caf(&[info(&[("title", "Song")])]);
    bytes.extend(b"free");
    bytes.extend(i64::MAX.to_be_bytes());
    bytes.extend([0; 16]);

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(&bytes).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let scan = scan(&mut file).unwrap();
    let entries: Vec<_> = scan.metadata.iter().collect();
    assert_eq!(entries, vec![("title", "Song")]);
    assert_eq!(file.stream_position().unwrap(), 0);
}

#[test]
fn large_info_chunk() {
    let keys: Vec<String> = (0..100_000).map(|n| format!("k{n}")).collect();
    let pairs: Vec<(&str, &str)> = keys.iter().map(|k| (k.as_str(), "v")).collect();
    let bytes = caf(&[info(&pairs)]);

    let scan = scan(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(scan.metadata.len(), 100_000);
    assert_eq!(scan.metadata.get("k99999"), Some("v"));
}

#[test]
fn truncated_chunk_header() {
    let mut bytes = caf(&[info(&[("title", "Song")])]);
    bytes.extend(b"uui");
    let scan = scan(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(scan.metadata.get("title"), Some("Song"));
}

#[test]
fn oversized_midi_is_skipped() {
    let bytes = caf(&[chunk(b"midi", &midi_file()), info(&[("title", "Song")])]);
    let options = ScanOptions {
        max_payload_bytes: 16,
    };
    let scan = scan_with(&mut Cursor::new(bytes), &options).unwrap();
    assert_eq!(scan.metadata.get("title"), Some("Song"));
    assert!(!scan.metadata.contains_key(MIDI_DATA_BASE64));
}

#[test]
fn unparseable_midi_contributes_nothing() {
    let bytes = caf(&[chunk(b"midi", b"not a midi file"), info(&[("title", "Song")])]);
    let scan = scan(&mut Cursor::new(bytes)).unwrap();
    let entries: Vec<_> = scan.metadata.iter().collect();
    assert_eq!(entries, vec![("title", "Song")]);
}

#[test]
fn foreign_streams_are_not_recognized() {
    for bytes in [b"RIFF\0\0\0\0WAVEfmt ".to_vec(), b"caf".to_vec(), Vec::new()] {
        let mut stream = Cursor::new(bytes);
        let scan = scan(&mut stream).unwrap();
        assert!(!scan.recognized);
        assert!(scan.metadata.is_empty());
        assert_eq!(stream.position(), 0);
    }
}

#[test]
fn description_is_exposed_but_not_metadata() {
    let mut desc = 48_000f64.to_be_bytes().to_vec();
    desc.extend(b"lpcm");
    for value in [0u32, 4, 1, 2, 16] {
        desc.extend(value.to_be_bytes());
    }
    let bytes = caf(&[chunk(b"desc", &desc)]);
    let scan = scan(&mut Cursor::new(bytes)).unwrap();

    let description = scan.description.unwrap();
    assert_eq!(description.sample_rate, 48_000.);
    assert_eq!(description.channels_per_frame, 2);
    assert!(scan.metadata.is_empty());
}

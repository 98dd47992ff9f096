use super::{
    KEY_SIGNATURE, KEY_SIGNATURE_SEQUENCE, MIDI_DATA_BASE64, MetadataMap, TEMPO, TEMPO_SEQUENCE,
    TIME_SIGNATURE, TIME_SIGNATURE_SEQUENCE,
};
use crate::midi::{EventTimeline, MidiFile};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt::Display;

#[doc = r#"
Metadata for the payload of a `midi` chunk.

When the payload parses as a Standard MIDI File, the result holds the base64 of the
payload under [`MIDI_DATA_BASE64`] followed by everything [`derive_musical_metadata`]
finds. When it does not parse, the result is empty.
"#]
pub fn midi_chunk_metadata(bytes: &[u8]) -> MetadataMap {
    let file = match MidiFile::parse(bytes) {
        Ok(file) => file,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Ignoring unparseable MIDI chunk: {}", _e);
            return MetadataMap::new();
        }
    };

    let mut map = MetadataMap::new();
    map.insert(MIDI_DATA_BASE64, STANDARD.encode(bytes));
    map.merge(derive_musical_metadata(&file.into_timeline()));
    map
}

#[doc = r#"
Summarise the tempo, time signature and key signature changes of a timeline.

Each of the three produces up to two entries: the first value under its scalar key,
and, when there are at least two changes, every change as `value,ticks;` under its
sequence key. Tempo changes that do not give a positive beats-per-minute are ignored.

# Example
```rust
# use cafmeta::midi::MidiFile;
# use cafmeta::metadata::{derive_musical_metadata, TEMPO, TEMPO_SEQUENCE};
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 11,
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20,
    0x00, 0xFF, 0x2F, 0x00,
];
let timeline = MidiFile::parse(&bytes).unwrap().into_timeline();
let map = derive_musical_metadata(&timeline);
assert_eq!(map.get(TEMPO), Some("120"));
assert_eq!(map.get(TEMPO_SEQUENCE), None);
```
"#]
pub fn derive_musical_metadata(timeline: &EventTimeline) -> MetadataMap {
    let mut map = MetadataMap::new();

    summarise(
        &mut map,
        TEMPO,
        TEMPO_SEQUENCE,
        timeline
            .tempo_events()
            .filter_map(|(ticks, tempo)| tempo.beats_per_minute().map(|bpm| (ticks, bpm))),
    );
    summarise(
        &mut map,
        TIME_SIGNATURE,
        TIME_SIGNATURE_SEQUENCE,
        timeline
            .time_signature_events()
            .map(|(ticks, sig)| (ticks, format!("{}/{}", sig.numerator(), sig.denominator()))),
    );
    summarise(
        &mut map,
        KEY_SIGNATURE,
        KEY_SIGNATURE_SEQUENCE,
        timeline
            .key_signature_events()
            .map(|(ticks, sig)| (ticks, sig.name())),
    );

    map
}

fn summarise<T: Display>(
    map: &mut MetadataMap,
    scalar_key: &str,
    sequence_key: &str,
    events: impl Iterator<Item = (u64, T)>,
) {
    let mut first = None;
    let mut sequence = String::new();
    let mut count = 0usize;

    for (ticks, value) in events {
        let value = value.to_string();
        sequence.push_str(&format!("{value},{ticks};"));
        if first.is_none() {
            first = Some(value);
        }
        count += 1;
    }

    let Some(first) = first else {
        return;
    };
    map.insert(scalar_key, first);
    if count > 1 {
        map.insert(sequence_key, sequence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::{KeySignature, MetaMessage, Tempo, TimeSignature};
    use pretty_assertions::assert_eq;

    /// A format 0 file with one track holding the given meta events.
    fn smf(events: &[(u32, MetaMessage)]) -> Vec<u8> {
        let mut track = Vec::new();
        for (delta, meta) in events {
            push_vlq(&mut track, *delta);
            track.push(0xFF);
            let (kind, data) = match meta {
                MetaMessage::Tempo(t) => {
                    let b = t.micros_per_quarter_note().to_be_bytes();
                    (0x51, vec![b[1], b[2], b[3]])
                }
                MetaMessage::TimeSignature(s) => (
                    0x58,
                    vec![
                        s.numerator(),
                        s.denominator().trailing_zeros() as u8,
                        s.clocks_per_click(),
                        s.notated_32nds_per_quarter(),
                    ],
                ),
                MetaMessage::KeySignature(k) => (
                    0x59,
                    vec![k.sharps_or_flats() as u8, u8::from(!k.is_major())],
                ),
                MetaMessage::EndOfTrack => (0x2F, vec![]),
                MetaMessage::Other { kind, data } => (*kind, data.clone()),
            };
            track.push(kind);
            push_vlq(&mut track, data.len() as u32);
            track.extend(data);
        }
        track.extend([0x00, 0xFF, 0x2F, 0x00]);

        let mut bytes = b"MThd\0\0\0\x06\0\0\0\x01\x01\xE0MTrk".to_vec();
        bytes.extend((track.len() as u32).to_be_bytes());
        bytes.extend(track);
        bytes
    }

    fn push_vlq(out: &mut Vec<u8>, mut value: u32) {
        let mut stack = vec![(value & 0x7F) as u8];
        value >>= 7;
        while value > 0 {
            stack.push((value & 0x7F) as u8 | 0x80);
            value >>= 7;
        }
        out.extend(stack.into_iter().rev());
    }

    fn derive(events: &[(u32, MetaMessage)]) -> MetadataMap {
        let timeline = MidiFile::parse(&smf(events)).unwrap().into_timeline();
        derive_musical_metadata(&timeline)
    }

    #[test]
    fn single_tempo_has_no_sequence() {
        let map = derive(&[(0, MetaMessage::Tempo(Tempo::new(500_000)))]);
        assert_eq!(map.get(TEMPO), Some("120"));
        assert_eq!(map.get(TEMPO_SEQUENCE), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn tempo_sequence_in_time_order() {
        let map = derive(&[
            (0, MetaMessage::Tempo(Tempo::new(500_000))),
            (960, MetaMessage::Tempo(Tempo::new(250_000))),
        ]);
        assert_eq!(map.get(TEMPO), Some("120"));
        assert_eq!(map.get(TEMPO_SEQUENCE), Some("120,0;240,960;"));
    }

    #[test]
    fn zero_tempo_is_skipped() {
        let map = derive(&[
            (0, MetaMessage::Tempo(Tempo::new(0))),
            (480, MetaMessage::Tempo(Tempo::new(1_000_000))),
        ]);
        assert_eq!(map.get(TEMPO), Some("60"));
        assert_eq!(map.get(TEMPO_SEQUENCE), None);
    }

    #[test]
    fn time_signatures() {
        let map = derive(&[
            (0, MetaMessage::TimeSignature(TimeSignature::new(4, 2, 24, 8))),
            (1920, MetaMessage::TimeSignature(TimeSignature::new(6, 3, 36, 8))),
        ]);
        assert_eq!(map.get(TIME_SIGNATURE), Some("4/4"));
        assert_eq!(map.get(TIME_SIGNATURE_SEQUENCE), Some("4/4,0;6/8,1920;"));
    }

    #[test]
    fn key_signatures() {
        let map = derive(&[
            (0, MetaMessage::KeySignature(KeySignature::new(0, false))),
            (480, MetaMessage::KeySignature(KeySignature::new(-1, true))),
            (480, MetaMessage::KeySignature(KeySignature::new(9, false))),
        ]);
        assert_eq!(map.get(KEY_SIGNATURE), Some("C"));
        assert_eq!(
            map.get(KEY_SIGNATURE_SEQUENCE),
            Some("C,0;Dm,480;C#,960;")
        );
    }

    #[test]
    fn empty_timeline_gives_nothing() {
        assert!(derive(&[]).is_empty());
    }

    #[test]
    fn chunk_metadata_carries_the_payload() {
        let bytes = smf(&[(0, MetaMessage::Tempo(Tempo::new(500_000)))]);
        let map = midi_chunk_metadata(&bytes);
        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![MIDI_DATA_BASE64, TEMPO]);
        assert_eq!(
            STANDARD.decode(map.get(MIDI_DATA_BASE64).unwrap()).unwrap(),
            bytes
        );
    }

    #[test]
    fn unparseable_chunk_gives_nothing() {
        assert!(midi_chunk_metadata(b"not a midi file").is_empty());
        assert!(midi_chunk_metadata(&[]).is_empty());
    }
}

#![doc = r#"
Decoding of the Standard MIDI File carried in a CAF `midi` chunk

Only as much of the file as musical metadata needs is interpreted: the header, the
delta-timed track events, and the tempo, time signature and key signature meta events.
Channel messages and system exclusive payloads are decoded far enough to stay in sync
with the byte stream and are otherwise kept opaque.

# Example
```rust
# use cafmeta::midi::MidiFile;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 11,
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20,
    0x00, 0xFF, 0x2F, 0x00,
];
let timeline = MidiFile::parse(&bytes).unwrap().into_timeline();
let (ticks, tempo) = timeline.tempo_events().next().unwrap();
assert_eq!(ticks, 0);
assert_eq!(tempo.beats_per_minute(), Some(120.));
```
"#]

/// Contains the [`MidiFileBuilder`](builder::MidiFileBuilder) and the chunk reader.
pub mod builder;
pub use builder::FormatType;

mod meta;
pub use meta::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

mod timeline;
pub use timeline::*;

use crate::reader::{ByteReader, ReadResult, ReaderError, ReaderErrorKind};
use builder::{MidiFileBuilder, chunk::read_chunk};

#[doc = r#"
A parsed Standard MIDI File
"#]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    format: FormatType,
    timing: Timing,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Parse a set of bytes into a file struct
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = ByteReader::from_byte_slice(bytes);
        let mut builder = MidiFileBuilder::default();

        loop {
            let chunk = read_chunk(&mut reader)?;
            if chunk.is_eof() {
                break;
            }
            builder.handle_chunk(reader.position(), chunk)?;
        }

        builder
            .build()
            .map_err(|k| ReaderError::new(reader.position(), ReaderErrorKind::midi(k)))
    }

    /// Returns header timing info
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Returns the format type for the file.
    pub fn format_type(&self) -> FormatType {
        self.format
    }

    /// Returns the track list
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Merge every track into a single timeline ordered by tick.
    pub fn into_timeline(self) -> EventTimeline {
        EventTimeline::new(self)
    }
}

#![doc = r#"
Contains types for MIDI file chunks

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit length field and then the chunk data. The Standard MIDI File (SMF)
specification defines two chunk types, though files may contain additional proprietary chunks.

## Header chunk

The header chunk (identified by "MThd") carries the file format (single track, simultaneous
tracks, or independent tracks), the number of tracks, and the [`Timing`] division.
Its length is at least 6 bytes; anything past the first 6 is ignored.

## Track chunks

Track chunks (identified by "MTrk") contain the delta-timed events.

## Unknown chunks

Any other chunk is skipped by its declared length.

A chunk whose declared length runs past the end of the data ends the chunk stream, the
same way a missing chunk would.
"#]

use crate::{
    MidiError,
    midi::{FormatType, Timing},
    reader::{ByteReader, ReadResult, ReaderError, ReaderErrorKind},
};
use std::io::{Read, Seek};

const HEADER: [u8; 4] = *b"MThd";
const TRACK: [u8; 4] = *b"MTrk";

/// The decoded `MThd` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeaderChunk {
    format: FormatType,
    num_tracks: u16,
    timing: Timing,
}

impl RawHeaderChunk {
    /// The file format
    pub const fn format_type(&self) -> FormatType {
        self.format
    }
    /// The number of tracks the header announces
    pub const fn num_tracks(&self) -> u16 {
        self.num_tracks
    }
    /// The delta-time division
    pub const fn timing(&self) -> Timing {
        self.timing
    }
}

/// An `MTrk` payload, not yet decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrackChunk(pub(crate) Vec<u8>);

/// One step through the chunks of a MIDI file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkEvent {
    /// `MThd`
    Header(RawHeaderChunk),
    /// `MTrk`
    Track(RawTrackChunk),
    /// Any other chunk, with its type and declared length
    Unknown {
        /// The 4-character identifier
        kind: [u8; 4],
        /// The declared length
        len: u32,
    },
    /// No further complete chunk
    Eof,
}

impl ChunkEvent {
    /// True if there are no more chunks
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

/// Read the next chunk from a MIDI byte stream.
pub fn read_chunk<R: Read + Seek>(reader: &mut ByteReader<R>) -> ReadResult<ChunkEvent> {
    if reader.remaining() < 8 {
        return Ok(ChunkEvent::Eof);
    }
    let kind: [u8; 4] = reader.read_exact_size()?;
    let len = reader.read_u32_be()?;
    if u64::from(len) > reader.remaining() {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "MIDI chunk {:?} declares {} bytes but only {} remain",
            String::from_utf8_lossy(&kind),
            len,
            reader.remaining()
        );
        return Ok(ChunkEvent::Eof);
    }

    match kind {
        HEADER => {
            let position = reader.position();
            if len < 6 {
                return Err(ReaderError::new(
                    position,
                    ReaderErrorKind::midi(MidiError::HeaderLength(len)),
                ));
            }
            let format = reader.read_u16_be()?;
            let num_tracks = reader.read_u16_be()?;
            let division: [u8; 2] = reader.read_exact_size()?;
            reader.skip(u64::from(len) - 6)?;

            let format = FormatType::from_word(format)
                .map_err(|e| ReaderError::new(position, ReaderErrorKind::midi(e)))?;
            let timing = Timing::from_division(division)
                .map_err(|e| ReaderError::new(position + 4, ReaderErrorKind::midi(e)))?;

            Ok(ChunkEvent::Header(RawHeaderChunk {
                format,
                num_tracks,
                timing,
            }))
        }
        TRACK => Ok(ChunkEvent::Track(RawTrackChunk(
            reader.read_bytes(u64::from(len))?,
        ))),
        kind => {
            reader.skip(u64::from(len))?;
            Ok(ChunkEvent::Unknown { kind, len })
        }
    }
}

#[test]
fn header_chunk_decodes() {
    let bytes = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 2, 0x01, 0xE0,
    ];
    let mut reader = ByteReader::from_byte_slice(&bytes);
    let ChunkEvent::Header(header) = read_chunk(&mut reader).unwrap() else {
        panic!("expected a header chunk");
    };
    assert_eq!(header.format_type(), FormatType::Simultaneous);
    assert_eq!(header.num_tracks(), 2);
    assert_eq!(header.timing(), Timing::TicksPerQuarterNote(480));
    assert!(read_chunk(&mut reader).unwrap().is_eof());
}

#[test]
fn truncated_chunk_ends_the_stream() {
    let bytes = [b'M', b'T', b'r', b'k', 0, 0, 0, 20, 0x00, 0xFF];
    let mut reader = ByteReader::from_byte_slice(&bytes);
    assert!(read_chunk(&mut reader).unwrap().is_eof());
}

#[test]
fn unknown_chunks_are_skipped() {
    let bytes = [b'X', b'Y', b'Z', b'W', 0, 0, 0, 2, 0xAA, 0xBB];
    let mut reader = ByteReader::from_byte_slice(&bytes);
    assert_eq!(
        read_chunk(&mut reader).unwrap(),
        ChunkEvent::Unknown {
            kind: *b"XYZW",
            len: 2
        }
    );
    assert!(reader.is_exhausted());
}

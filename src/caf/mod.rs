#![doc = r#"
The Core Audio Format container

# Overview

A CAF file starts with an 8-byte file header followed by a flat list of chunks:

```text
file header:  'caff'  version u16  flags u16
chunk header: type u32 (four character code)  size i64
```

All integers are big-endian. A chunk's size counts only its payload. The `data`
chunk may declare a size of `-1`, meaning it runs to the end of the file; no chunk
can follow it.

The chunks this crate reads are:

- `desc`: the [`AudioDescription`]
- `chan`: the [`ChannelLayout`](crate::layout::ChannelLayout)
- `pakt`: the [`PacketTableHeader`], for the exact frame count of compressed audio
- `info`: free-form key/value strings
- `uuid`: vendor chunks; the one tagged [`METADATA_UUID`] holds key/value strings
- `midi`: a Standard MIDI File, see [`crate::midi`]
- `data`: the sample payload, whose size is all this crate needs

Everything else is skipped by its declared size. See [`scan`] for the metadata walk
and [`crate::stream::describe`] for the stream description.
"#]

mod description;
pub use description::*;

mod info;
pub use info::*;

mod packet;
pub use packet::*;

pub(crate) mod walker;
pub use walker::{Scan, ScanOptions, scan, scan_with};

use crate::reader::{ByteReader, ReadResult};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::{
    fmt,
    io::{Read, Seek},
};

/// `'caff'`
pub const FILE_TYPE: u32 = 0x6361_6666;

/// Size of the file header
pub const FILE_HEADER_SIZE: u64 = 8;

/// Size of a chunk header
pub const CHUNK_HEADER_SIZE: u64 = 12;

#[doc = r#"
A chunk's four character code, read as a big-endian `u32`.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkType(u32);

impl ChunkType {
    /// `'desc'`
    pub const AUDIO_DESCRIPTION: Self = Self(KnownChunk::AudioDescription as u32);
    /// `'uuid'`
    pub const USER_DEFINED: Self = Self(KnownChunk::UserDefined as u32);
    /// `'midi'`
    pub const MIDI: Self = Self(KnownChunk::Midi as u32);
    /// `'info'`
    pub const INFORMATION: Self = Self(KnownChunk::Information as u32);
    /// `'data'`
    pub const AUDIO_DATA: Self = Self(KnownChunk::AudioData as u32);
    /// `'chan'`
    pub const CHANNEL_LAYOUT: Self = Self(KnownChunk::ChannelLayout as u32);
    /// `'pakt'`
    pub const PACKET_TABLE: Self = Self(KnownChunk::PacketTable as u32);

    /// Wrap a raw type code
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Build a type code from its four characters
    pub const fn from_fourcc(code: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(code))
    }

    /// The raw type code
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The four characters
    pub const fn fourcc(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// The chunk kind, if this crate reads it
    pub fn kind(&self) -> Option<KnownChunk> {
        KnownChunk::try_from(self.0).ok()
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.fourcc();
        if code.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            write!(f, "'{}'", String::from_utf8_lossy(&code))
        } else {
            write!(f, "{:#010x}", self.0)
        }
    }
}

/// The chunk types this crate interprets
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum KnownChunk {
    /// `'desc'`
    AudioDescription = 0x6465_7363,
    /// `'uuid'`
    UserDefined = 0x7575_6964,
    /// `'midi'`
    Midi = 0x6D69_6469,
    /// `'info'`
    Information = 0x696E_666F,
    /// `'data'`
    AudioData = 0x6461_7461,
    /// `'chan'`
    ChannelLayout = 0x6368_616E,
    /// `'pakt'`
    PacketTable = 0x7061_6B74,
}

/// The fixed header at the start of every CAF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHeader {
    /// Should be [`FILE_TYPE`]
    pub file_type: u32,
    /// Format version, 1 for every file in the wild
    pub version: u16,
    /// Reserved
    pub flags: u16,
}

impl FileHeader {
    /// Read the eight header bytes
    pub fn read<R: Read + Seek>(reader: &mut ByteReader<R>) -> ReadResult<Self> {
        Ok(Self {
            file_type: reader.read_u32_be()?,
            version: reader.read_u16_be()?,
            flags: reader.read_u16_be()?,
        })
    }

    /// True if the magic is `'caff'`
    pub const fn is_caf(&self) -> bool {
        self.file_type == FILE_TYPE
    }
}

/// A chunk's type and declared payload size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkHeader {
    /// The chunk type
    pub chunk_type: ChunkType,
    /// Payload size in bytes. `-1` only for a `data` chunk that runs to the end of the file.
    pub size: i64,
}

impl ChunkHeader {
    /// Read the twelve header bytes
    pub fn read<R: Read + Seek>(reader: &mut ByteReader<R>) -> ReadResult<Self> {
        Ok(Self {
            chunk_type: ChunkType::new(reader.read_u32_be()?),
            size: reader.read_i64_be()?,
        })
    }

    /// True for a `data` chunk of unknown size
    pub fn is_open_ended_data(&self) -> bool {
        self.chunk_type == ChunkType::AUDIO_DATA && self.size == -1
    }

    /// The payload size, if it is a real size
    pub fn payload_size(&self) -> Option<u64> {
        u64::try_from(self.size).ok()
    }
}

#[test]
fn chunk_type_codes() {
    assert_eq!(ChunkType::from_fourcc(*b"desc"), ChunkType::AUDIO_DESCRIPTION);
    assert_eq!(ChunkType::from_fourcc(*b"pakt").kind(), Some(KnownChunk::PacketTable));
    assert_eq!(ChunkType::from_fourcc(*b"free").kind(), None);
    assert_eq!(ChunkType::MIDI.to_string(), "'midi'");
    assert_eq!(ChunkType::new(1).to_string(), "0x00000001");
    assert_eq!(FILE_TYPE, u32::from_be_bytes(*b"caff"));
}

#[test]
fn chunk_header_sizes() {
    let bytes = [b'd', b'a', b't', b'a', 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    let mut reader = ByteReader::from_byte_slice(&bytes);
    let header = ChunkHeader::read(&mut reader).unwrap();
    assert!(header.is_open_ended_data());
    assert_eq!(header.payload_size(), None);
}

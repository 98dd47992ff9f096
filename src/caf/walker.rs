use super::{
    AudioDescription, ChunkHeader, ChunkType, FileHeader, KnownChunk, parse_information_chunk,
    parse_user_defined_chunk,
};
use crate::{
    metadata::{MetadataMap, midi_chunk_metadata},
    reader::{ByteReader, ReadResult},
};
use std::{
    io::{Read, Seek},
    ops::ControlFlow,
};

/// Runtime limits for [`scan_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanOptions {
    /// Largest `midi` payload read into memory. Larger chunks are skipped.
    pub max_payload_bytes: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_payload_bytes: 16 * 1024 * 1024,
        }
    }
}

/// The result of a metadata walk
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scan {
    /// True if the stream starts with a CAF file header
    pub recognized: bool,
    /// Everything the `info`, `uuid` and `midi` chunks contributed, in file order
    pub metadata: MetadataMap,
    /// The `desc` chunk, if one was read before the walk ended
    pub description: Option<AudioDescription>,
}

#[doc = r#"
Walk the chunks of a CAF stream and collect its metadata.

Equivalent to [`scan_with`] with default [`ScanOptions`].

# Example
```rust
# use std::io::Cursor;
let mut bytes = b"caff\0\x01\0\0".to_vec();
bytes.extend(b"info");
bytes.extend(15i64.to_be_bytes());
bytes.extend(1u32.to_be_bytes());
bytes.extend(b"title\0Song\0");

let mut stream = Cursor::new(bytes);
let scan = cafmeta::caf::scan(&mut stream).unwrap();
assert!(scan.recognized);
assert_eq!(scan.metadata.get("title"), Some("Song"));
assert_eq!(stream.position(), 0);
```
"#]
pub fn scan<R: Read + Seek>(stream: &mut R) -> ReadResult<Scan> {
    scan_with(stream, &ScanOptions::default())
}

#[doc = r#"
Walk the chunks of a CAF stream and collect its metadata.

The walk is non-destructive: the stream is left where it was found, whatever
the outcome.

- A stream that does not start with `caff` gives `recognized: false` and no metadata.
- The walk stops at the end of the stream, at a `data` chunk of size `-1`, or at any
  other chunk with a negative size.
- A chunk that runs past the end of the stream ends the walk; metadata gathered up
  to that point is kept.
- An embedded MIDI file that fails to parse contributes nothing.

# Errors
Only failures of the underlying stream are returned.
"#]
pub fn scan_with<R: Read + Seek>(stream: &mut R, options: &ScanOptions) -> ReadResult<Scan> {
    peek(stream, |reader| {
        let mut scan = Scan::default();
        let recognized = walk_chunks(reader, |reader, header, end| {
            read_metadata_chunk(reader, header, end, options, &mut scan)
        })?;
        scan.recognized = recognized;
        Ok(scan)
    })
}

/// Run `f` over a reader wrapping `stream`, then put the stream back where it was.
pub(crate) fn peek<R: Read + Seek, T>(
    stream: &mut R,
    f: impl FnOnce(&mut ByteReader<&mut R>) -> ReadResult<T>,
) -> ReadResult<T> {
    let mut reader = ByteReader::new(stream)?;
    let start = reader.position();
    let result = f(&mut reader);
    let restored = reader.set_position(start);
    let value = result?;
    restored?;
    Ok(value)
}

#[doc = r#"
Read the file header and hand every chunk to `visit`, together with the position its
payload ends at. Returns false, without visiting anything, if the stream is not CAF.

`visit` may leave the cursor anywhere; the walk continues from the chunk's end. The open
ended `data` chunk is visited with the stream length as its end, and ends the walk.
Chunks with any other negative size end the walk unvisited, and so does a chunk that
claims to run past the end of the stream; a cut-short `data` chunk is visited first,
with the stream length as its end. An out-of-bounds read, either here or in `visit`,
ends the walk quietly.
"#]
pub(crate) fn walk_chunks<R, F>(reader: &mut ByteReader<R>, mut visit: F) -> ReadResult<bool>
where
    R: Read + Seek,
    F: FnMut(&mut ByteReader<R>, &ChunkHeader, u64) -> ReadResult<()>,
{
    let header = match FileHeader::read(reader) {
        Ok(header) => header,
        Err(e) if e.is_out_of_bounds() => return Ok(false),
        Err(e) => return Err(e),
    };
    if !header.is_caf() {
        return Ok(false);
    }

    while !reader.is_exhausted() {
        match next_chunk(reader, &mut visit) {
            Ok(ControlFlow::Continue(())) => {}
            Ok(ControlFlow::Break(())) => break,
            Err(e) if e.is_out_of_bounds() => {
                #[cfg(feature = "tracing")]
                tracing::warn!("CAF stream truncated, stopping: {}", e);
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}

fn next_chunk<R, F>(reader: &mut ByteReader<R>, visit: &mut F) -> ReadResult<ControlFlow<()>>
where
    R: Read + Seek,
    F: FnMut(&mut ByteReader<R>, &ChunkHeader, u64) -> ReadResult<()>,
{
    let header = ChunkHeader::read(reader)?;
    if header.is_open_ended_data() {
        // sample data runs to the end of the file; nothing can follow it
        let end = reader.len();
        visit(reader, &header, end)?;
        return Ok(ControlFlow::Break(()));
    }
    let Some(size) = header.payload_size() else {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Chunk {} has invalid size {}, stopping",
            header.chunk_type,
            header.size
        );
        return Ok(ControlFlow::Break(()));
    };
    let end = reader.position().saturating_add(size);
    let len = reader.len();
    if end > len {
        if header.chunk_type == ChunkType::AUDIO_DATA {
            // a cut-short data chunk still tells how much audio there is
            visit(reader, &header, len)?;
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Chunk {} of {} bytes runs past the end of the stream, stopping",
                header.chunk_type,
                size
            );
        }
        return Ok(ControlFlow::Break(()));
    }
    visit(reader, &header, end)?;
    reader.set_position(end)?;
    Ok(ControlFlow::Continue(()))
}

fn read_metadata_chunk<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    header: &ChunkHeader,
    end: u64,
    options: &ScanOptions,
    scan: &mut Scan,
) -> ReadResult<()> {
    match header.chunk_type.kind() {
        Some(KnownChunk::AudioDescription) => match AudioDescription::read(reader, header.size) {
            Ok(description) => scan.description = Some(description),
            Err(e) if e.is_io() || e.is_out_of_bounds() => return Err(e),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Ignoring audio description: {}", _e);
            }
        },
        Some(KnownChunk::UserDefined) => {
            scan.metadata.merge(parse_user_defined_chunk(reader, end)?);
        }
        Some(KnownChunk::Information) => {
            scan.metadata.merge(parse_information_chunk(reader, end)?);
        }
        Some(KnownChunk::Midi) => {
            let size = end - reader.position();
            if size > options.max_payload_bytes {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "Skipping {} byte MIDI chunk, limit is {}",
                    size,
                    options.max_payload_bytes
                );
            } else {
                let bytes = reader.read_bytes(size)?;
                scan.metadata.merge(midi_chunk_metadata(&bytes));
            }
        }
        Some(KnownChunk::AudioData | KnownChunk::ChannelLayout | KnownChunk::PacketTable) => {}
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Skipping {} chunk of {} bytes",
                header.chunk_type,
                header.size
            );
        }
    }
    Ok(())
}

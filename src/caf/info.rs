use crate::{
    metadata::MetadataMap,
    reader::{ByteReader, ReadResult},
};
use std::io::{Read, Seek};

/// The `uuid` chunk identifier `29819273-B5BF-4AEF-B78D-62D1EF90BB2C`, whose payload
/// is a list of key/value strings
pub const METADATA_UUID: [u8; 16] = [
    0x29, 0x81, 0x92, 0x73, 0xB5, 0xBF, 0x4A, 0xEF, 0xB7, 0x8D, 0x62, 0xD1, 0xEF, 0x90, 0xBB, 0x2C,
];

/// Read up to `count` NUL-terminated key/value pairs, stopping once the cursor reaches `end`.
/// A pair cut off by `end` is dropped.
fn read_string_pairs<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    count: u32,
    end: u64,
) -> ReadResult<MetadataMap> {
    let mut map = MetadataMap::new();
    for _ in 0..count {
        if reader.position() >= end {
            break;
        }
        match read_pair(reader, end) {
            Ok((key, value)) => {
                map.insert(key, value);
            }
            Err(_e) if _e.is_out_of_bounds() => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Unterminated string in metadata chunk: {}", _e);
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(map)
}

fn read_pair<R: Read + Seek>(reader: &mut ByteReader<R>, end: u64) -> ReadResult<(String, String)> {
    let key = reader.read_cstring_before(end)?;
    let value = reader.read_cstring_before(end)?;
    Ok((key, value))
}

#[doc = r#"
Read the payload of an `info` chunk ending at `end`: a `u32` count followed by that
many key/value string pairs.

The cursor is left wherever the last string ended; the caller moves it to `end`.
"#]
pub fn parse_information_chunk<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    end: u64,
) -> ReadResult<MetadataMap> {
    let count = reader.read_u32_be()?;
    read_string_pairs(reader, count, end)
}

#[doc = r#"
Read the payload of a `uuid` chunk ending at `end`.

Only a chunk tagged with [`METADATA_UUID`] contributes; its identifier is followed by
a `u32` count and that many key/value string pairs. Any other chunk gives an empty map.

The cursor is left wherever reading stopped; the caller moves it to `end`.
"#]
pub fn parse_user_defined_chunk<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    end: u64,
) -> ReadResult<MetadataMap> {
    if end.saturating_sub(reader.position()) < METADATA_UUID.len() as u64 {
        return Ok(MetadataMap::new());
    }
    let uuid: [u8; 16] = reader.read_exact_size()?;
    if uuid != METADATA_UUID {
        #[cfg(feature = "tracing")]
        tracing::debug!("Skipping uuid chunk with foreign identifier {:02x?}", uuid);
        return Ok(MetadataMap::new());
    }
    let count = reader.read_u32_be()?;
    read_string_pairs(reader, count, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(count: u32, strings: &[&str]) -> Vec<u8> {
        let mut out = count.to_be_bytes().to_vec();
        for s in strings {
            out.extend(s.as_bytes());
            out.push(0);
        }
        out
    }

    #[test]
    fn information_pairs() {
        let bytes = pairs(2, &["artist", "Someone", "title", "Song"]);
        let mut reader = ByteReader::from_byte_slice(&bytes);
        let map = parse_information_chunk(&mut reader, bytes.len() as u64).unwrap();
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("artist", "Someone"), ("title", "Song")]);
    }

    #[test]
    fn count_is_bounded_by_chunk_end() {
        let bytes = pairs(100, &["k", "v"]);
        let mut reader = ByteReader::from_byte_slice(&bytes);
        let map = parse_information_chunk(&mut reader, bytes.len() as u64).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn strings_do_not_cross_chunk_end() {
        let mut bytes = pairs(2, &["title", "Song", "artist"]);
        bytes.extend(b"Someone");
        let end = bytes.len() as u64;
        // the next chunk supplies the terminator
        bytes.extend(b"\0info");
        let mut reader = ByteReader::from_byte_slice(&bytes);
        let map = parse_information_chunk(&mut reader, end).unwrap();
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("title", "Song")]);
    }

    #[test]
    fn tagged_user_chunk() {
        let mut bytes = METADATA_UUID.to_vec();
        bytes.extend(pairs(1, &["encoder", "x"]));
        let mut reader = ByteReader::from_byte_slice(&bytes);
        let map = parse_user_defined_chunk(&mut reader, bytes.len() as u64).unwrap();
        assert_eq!(map.get("encoder"), Some("x"));
    }

    #[test]
    fn foreign_user_chunk() {
        let mut bytes = vec![0u8; 16];
        bytes.extend(pairs(1, &["encoder", "x"]));
        let mut reader = ByteReader::from_byte_slice(&bytes);
        let map = parse_user_defined_chunk(&mut reader, bytes.len() as u64).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn user_chunk_too_small_for_uuid() {
        let bytes = [0u8; 8];
        let mut reader = ByteReader::from_byte_slice(&bytes);
        let map = parse_user_defined_chunk(&mut reader, 8).unwrap();
        assert!(map.is_empty());
        assert_eq!(reader.position(), 0);
    }
}

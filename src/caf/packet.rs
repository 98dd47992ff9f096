use crate::reader::{ByteReader, ReadResult};
use std::io::{Read, Seek};

#[doc = r#"
The fixed header of a `pakt` chunk.

The packet sizes that follow it are not read; only the frame accounting matters here.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketTableHeader {
    /// Number of packets in the `data` chunk
    pub number_packets: i64,
    /// Frames of real audio, excluding priming and remainder frames
    pub number_valid_frames: i64,
    /// Encoder delay at the start
    pub priming_frames: i32,
    /// Padding at the end
    pub remainder_frames: i32,
}

impl PacketTableHeader {
    /// Read the 24 header bytes
    pub fn read<R: Read + Seek>(reader: &mut ByteReader<R>) -> ReadResult<Self> {
        Ok(Self {
            number_packets: reader.read_i64_be()?,
            number_valid_frames: reader.read_i64_be()?,
            priming_frames: reader.read_i32_be()?,
            remainder_frames: reader.read_i32_be()?,
        })
    }

    /// The valid frame count, if non-negative
    pub fn valid_frames(&self) -> Option<u64> {
        u64::try_from(self.number_valid_frames).ok()
    }
}

#[test]
fn reads_packet_table_header() {
    let mut bytes = Vec::new();
    bytes.extend(10i64.to_be_bytes());
    bytes.extend(9_000i64.to_be_bytes());
    bytes.extend(2_112i32.to_be_bytes());
    bytes.extend(128i32.to_be_bytes());
    let mut reader = ByteReader::from_byte_slice(&bytes);
    let header = PacketTableHeader::read(&mut reader).unwrap();
    assert_eq!(header.valid_frames(), Some(9_000));
    assert_eq!(header.priming_frames, 2_112);
    assert!(reader.is_exhausted());
}

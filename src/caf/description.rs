use crate::{
    ChunkError,
    reader::{ByteReader, ReadResult, ReaderError, ReaderErrorKind},
};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::io::{Read, Seek};

/// Size of a `desc` payload
pub const AUDIO_DESCRIPTION_SIZE: i64 = 32;

/// `kCAFLinearPCMFormatFlagIsFloat`
pub const FORMAT_FLAG_IS_FLOAT: u32 = 1 << 0;
/// `kCAFLinearPCMFormatFlagIsLittleEndian`
pub const FORMAT_FLAG_IS_LITTLE_ENDIAN: u32 = 1 << 1;

/// Common values of [`AudioDescription::format_id`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum FormatId {
    /// `'lpcm'`
    LinearPcm = 0x6C70_636D,
    /// `'aac '`
    Aac = 0x6161_6320,
    /// `'alac'`
    AppleLossless = 0x616C_6163,
    /// `'ulaw'`
    ULaw = 0x756C_6177,
    /// `'alaw'`
    ALaw = 0x616C_6177,
    /// `'ima4'`
    Ima4 = 0x696D_6134,
    /// `'.mp3'`
    MpegLayer3 = 0x2E6D_7033,
}

#[doc = r#"
The payload of a `desc` chunk.

Describes how samples are stored, not how a decoder delivers them; see
[`StreamDescription`](crate::stream::StreamDescription) for the latter.
"#]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudioDescription {
    /// Frames per second
    pub sample_rate: f64,
    /// Four character codec identifier
    pub format_id: u32,
    /// Codec specific flags
    pub format_flags: u32,
    /// Bytes per packet, 0 if variable
    pub bytes_per_packet: u32,
    /// Frames per packet, 0 if variable
    pub frames_per_packet: u32,
    /// Channel count
    pub channels_per_frame: u32,
    /// Bit depth, 0 for compressed formats
    pub bits_per_channel: u32,
}

impl AudioDescription {
    /// Read a `desc` payload of `size` bytes. The reader is left after the 32 bytes read.
    pub fn read<R: Read + Seek>(reader: &mut ByteReader<R>, size: i64) -> ReadResult<Self> {
        if size < AUDIO_DESCRIPTION_SIZE {
            return Err(ReaderError::new(
                reader.position(),
                ReaderErrorKind::chunk(ChunkError::DescriptionSize(size)),
            ));
        }
        Ok(Self {
            sample_rate: reader.read_f64_be()?,
            format_id: reader.read_u32_be()?,
            format_flags: reader.read_u32_be()?,
            bytes_per_packet: reader.read_u32_be()?,
            frames_per_packet: reader.read_u32_be()?,
            channels_per_frame: reader.read_u32_be()?,
            bits_per_channel: reader.read_u32_be()?,
        })
    }

    /// The codec, if it is one of the common ones
    pub fn format(&self) -> Option<FormatId> {
        FormatId::try_from(self.format_id).ok()
    }

    /// True for uncompressed PCM
    pub fn is_linear_pcm(&self) -> bool {
        self.format() == Some(FormatId::LinearPcm)
    }

    /// True for PCM stored as IEEE floats
    pub fn is_float_pcm(&self) -> bool {
        self.is_linear_pcm() && self.format_flags & FORMAT_FLAG_IS_FLOAT != 0
    }
}

#[cfg(test)]
pub(crate) fn lpcm_payload(sample_rate: f64, channels: u32, bits: u32, float: bool) -> Vec<u8> {
    let bytes_per_packet = channels * bits / 8;
    let mut out = Vec::with_capacity(32);
    out.extend(sample_rate.to_be_bytes());
    out.extend(u32::from(FormatId::LinearPcm).to_be_bytes());
    out.extend(u32::from(float).to_be_bytes());
    out.extend(bytes_per_packet.to_be_bytes());
    out.extend(1u32.to_be_bytes());
    out.extend(channels.to_be_bytes());
    out.extend(bits.to_be_bytes());
    out
}

#[test]
fn reads_description() {
    let bytes = lpcm_payload(48_000., 2, 24, false);
    let mut reader = ByteReader::from_byte_slice(&bytes);
    let desc = AudioDescription::read(&mut reader, 32).unwrap();
    assert_eq!(desc.sample_rate, 48_000.);
    assert_eq!(desc.channels_per_frame, 2);
    assert_eq!(desc.bytes_per_packet, 6);
    assert!(desc.is_linear_pcm());
    assert!(!desc.is_float_pcm());
}

#[test]
fn short_description_is_rejected() {
    let bytes = [0u8; 32];
    let mut reader = ByteReader::from_byte_slice(&bytes);
    let err = AudioDescription::read(&mut reader, 16).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&crate::ParseError::Chunk(ChunkError::DescriptionSize(16)))
    );
    assert_eq!(reader.position(), 0);
}

#![doc = r#"
Stream descriptions and the sample copy path

[`describe`] reads just enough of a CAF file to say what its audio is: rate, channel
count, bit depth, length and declared channel layout. Decoding the samples is left to
an external [`SampleCodec`]; [`AudioReader`] wraps one and delivers its channels in
canonical role order.
"#]

mod audio;
pub use audio::*;

use crate::{
    caf::{
        AudioDescription, ChunkHeader, KnownChunk, PacketTableHeader,
        walker::{peek, walk_chunks},
    },
    layout::ChannelLayout,
    reader::{ByteReader, ReadResult},
};
use std::io::{Read, Seek};

/// The `data` chunk payload starts with a `u32` edit count
const EDIT_COUNT_SIZE: u64 = 4;

#[doc = r#"
What a decoder delivers: the shape of the audio rather than how it is stored.

Compressed formats report 32-bit floating point samples, since that is what they
decode to.
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamDescription {
    sample_rate: f64,
    num_channels: u32,
    bits_per_sample: u32,
    uses_floating_point: bool,
    length_in_frames: u64,
    channel_layout: Option<ChannelLayout>,
}

impl StreamDescription {
    /// A description with no declared channel layout
    pub const fn new(
        sample_rate: f64,
        num_channels: u32,
        bits_per_sample: u32,
        uses_floating_point: bool,
        length_in_frames: u64,
    ) -> Self {
        Self {
            sample_rate,
            num_channels,
            bits_per_sample,
            uses_floating_point,
            length_in_frames,
            channel_layout: None,
        }
    }

    /// Attach a declared channel layout
    pub fn with_channel_layout(mut self, layout: ChannelLayout) -> Self {
        self.channel_layout = Some(layout);
        self
    }

    /// Frames per second
    pub const fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Channel count
    pub const fn num_channels(&self) -> u32 {
        self.num_channels
    }

    /// Bits per decoded sample
    pub const fn bits_per_sample(&self) -> u32 {
        self.bits_per_sample
    }

    /// True if samples decode to floats
    pub const fn uses_floating_point(&self) -> bool {
        self.uses_floating_point
    }

    /// Total frame count
    pub const fn length_in_frames(&self) -> u64 {
        self.length_in_frames
    }

    /// The `chan` chunk, if the file has one
    pub fn channel_layout(&self) -> Option<&ChannelLayout> {
        self.channel_layout.as_ref()
    }
}

#[doc = r#"
Describe the audio in a CAF stream.

Like [`scan`](crate::caf::scan) this is non-destructive: the stream is left
where it was found. Returns `None` if the stream is not CAF or has no usable `desc`
chunk.

The frame count comes from the `pakt` chunk when there is one. Otherwise it is derived
from the size of the `data` chunk and the packet shape in `desc`, which only works for
constant bit rate formats; anything else reports 0.

# Errors
Only failures of the underlying stream are returned.
"#]
pub fn describe<R: Read + Seek>(stream: &mut R) -> ReadResult<Option<StreamDescription>> {
    peek(stream, |reader| {
        let mut chunks = StreamChunks::default();
        let recognized = walk_chunks(reader, |reader, header, end| {
            chunks.read(reader, header, end)
        })?;
        if !recognized {
            return Ok(None);
        }
        Ok(chunks.into_description())
    })
}

#[derive(Default)]
struct StreamChunks {
    description: Option<AudioDescription>,
    layout: Option<ChannelLayout>,
    packet_table: Option<PacketTableHeader>,
    data_bytes: Option<u64>,
}

impl StreamChunks {
    fn read<R: Read + Seek>(
        &mut self,
        reader: &mut ByteReader<R>,
        header: &ChunkHeader,
        end: u64,
    ) -> ReadResult<()> {
        match header.chunk_type.kind() {
            Some(KnownChunk::AudioDescription) => {
                match AudioDescription::read(reader, header.size) {
                    Ok(description) => self.description = Some(description),
                    Err(e) if e.is_io() || e.is_out_of_bounds() => return Err(e),
                    Err(_e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!("Ignoring audio description: {}", _e);
                    }
                }
            }
            Some(KnownChunk::ChannelLayout) => {
                self.layout = Some(ChannelLayout::read(reader, end)?);
            }
            Some(KnownChunk::PacketTable) => {
                self.packet_table = Some(PacketTableHeader::read(reader)?);
            }
            Some(KnownChunk::AudioData) => {
                let payload = end.min(reader.len()).saturating_sub(reader.position());
                self.data_bytes = Some(payload.saturating_sub(EDIT_COUNT_SIZE));
            }
            _ => {}
        }
        Ok(())
    }

    fn into_description(self) -> Option<StreamDescription> {
        let Some(desc) = self.description else {
            #[cfg(feature = "tracing")]
            tracing::debug!("CAF stream has no audio description");
            return None;
        };

        let length_in_frames = match self.packet_table.and_then(|p| p.valid_frames()) {
            Some(frames) => frames,
            None => match (self.data_bytes, desc.bytes_per_packet) {
                (Some(bytes), bytes_per_packet) if bytes_per_packet > 0 => {
                    bytes / u64::from(bytes_per_packet) * u64::from(desc.frames_per_packet)
                }
                _ => 0,
            },
        };
        let bits_per_sample = match desc.bits_per_channel {
            0 => 32,
            bits => bits,
        };

        Some(StreamDescription {
            sample_rate: desc.sample_rate,
            num_channels: desc.channels_per_frame,
            bits_per_sample,
            uses_floating_point: desc.is_float_pcm() || !desc.is_linear_pcm(),
            length_in_frames,
            channel_layout: self.layout,
        })
    }
}

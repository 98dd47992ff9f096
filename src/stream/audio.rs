use super::StreamDescription;
use crate::{AudioError, layout::ChannelMap};

#[doc = r#"
A decoder for the samples of one stream.

Implementations decode planar `f32` frames in file channel order; [`AudioReader`]
reorders them.
"#]
pub trait SampleCodec {
    /// The codec's failure type
    type Error: std::error::Error + 'static;

    /// The stream being decoded
    fn description(&self) -> &StreamDescription;

    /// Decode `frame_count` frames starting at `start_frame` into `channels`, one buffer
    /// per file channel, each already at least `frame_count` long. Returns the number
    /// of frames written.
    fn read_frames(
        &mut self,
        start_frame: u64,
        frame_count: usize,
        channels: &mut [Vec<f32>],
    ) -> Result<usize, Self::Error>;
}

/// An encoder for the samples of one stream
pub trait SampleSink {
    /// The sink's failure type
    type Error: std::error::Error + 'static;

    /// The stream being encoded
    fn description(&self) -> &StreamDescription;

    /// Encode `frame_count` frames from `channels`, one buffer per channel.
    fn write_frames(&mut self, channels: &[&[f32]], frame_count: usize)
    -> Result<(), Self::Error>;
}

#[doc = r#"
Delivers a codec's frames with channels placed by their [`ChannelMap`].

The map is built once from the stream's declared layout. A layout that cannot be
reconciled with the channel count falls back to file order.
"#]
#[derive(Debug)]
pub struct AudioReader<C> {
    codec: C,
    map: ChannelMap,
    scratch: Vec<Vec<f32>>,
}

impl<C: SampleCodec> AudioReader<C> {
    /// Wrap a codec
    pub fn new(codec: C) -> Self {
        let description = codec.description();
        let map = ChannelMap::build(
            description.channel_layout(),
            description.num_channels() as usize,
        );
        #[cfg(feature = "tracing")]
        tracing::debug!("Channel map {:?} ({:?})", map.as_slice(), map.resolution());
        let scratch = vec![Vec::new(); map.len()];
        Self {
            codec,
            map,
            scratch,
        }
    }

    /// The stream being read
    pub fn description(&self) -> &StreamDescription {
        self.codec.description()
    }

    /// The file-to-destination channel map
    pub fn channel_map(&self) -> &ChannelMap {
        &self.map
    }

    /// Returns the wrapped codec
    pub fn into_inner(self) -> C {
        self.codec
    }

    #[doc = r#"
    Read `num_frames` frames starting at `start_frame` into
    `dest[channel][start_offset..start_offset + num_frames]`.

    File channel `i` lands in `dest[map[i]]`. Frames past the end of the stream and
    destination channels the file does not provide are zero-filled. File channels
    whose slot is beyond `dest` are dropped.

    # Errors
    [`AudioError::BufferTooShort`] if a destination buffer cannot hold the range, or
    [`AudioError::Codec`] if decoding fails.
    "#]
    pub fn read_samples(
        &mut self,
        dest: &mut [&mut [f32]],
        start_offset: usize,
        start_frame: u64,
        num_frames: usize,
    ) -> Result<(), AudioError<C::Error>> {
        let end = start_offset.saturating_add(num_frames);
        if let Some(short) = dest.iter().find(|channel| channel.len() < end) {
            return Err(AudioError::BufferTooShort {
                required: end,
                available: short.len(),
            });
        }
        for channel in dest.iter_mut() {
            channel[start_offset..end].fill(0.0);
        }

        let length = self.codec.description().length_in_frames();
        let available = usize::try_from(length.saturating_sub(start_frame))
            .unwrap_or(usize::MAX)
            .min(num_frames);
        if available == 0 {
            return Ok(());
        }

        for buffer in &mut self.scratch {
            buffer.clear();
            buffer.resize(available, 0.0);
        }
        let read = self
            .codec
            .read_frames(start_frame, available, &mut self.scratch)
            .map_err(AudioError::Codec)?
            .min(available);

        for (source, &slot) in self.scratch.iter().zip(self.map.as_slice()) {
            let Some(channel) = dest.get_mut(slot) else {
                continue;
            };
            let count = read.min(source.len());
            channel[start_offset..start_offset + count].copy_from_slice(&source[..count]);
        }
        Ok(())
    }
}

/// Checks planar buffers against the stream shape before handing them to a [`SampleSink`]
#[derive(Debug)]
pub struct AudioWriter<S> {
    sink: S,
}

impl<S: SampleSink> AudioWriter<S> {
    /// Wrap a sink
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    /// The stream being written
    pub fn description(&self) -> &StreamDescription {
        self.sink.description()
    }

    /// Returns the wrapped sink
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Write `num_frames` frames, one buffer per channel.
    ///
    /// # Errors
    /// [`AudioError::ChannelCount`] or [`AudioError::BufferTooShort`] if the buffers do
    /// not fit the stream, or [`AudioError::Codec`] if the sink fails.
    pub fn write_samples(
        &mut self,
        channels: &[&[f32]],
        num_frames: usize,
    ) -> Result<(), AudioError<S::Error>> {
        let expected = self.sink.description().num_channels() as usize;
        if channels.len() != expected {
            return Err(AudioError::ChannelCount {
                expected,
                actual: channels.len(),
            });
        }
        if let Some(short) = channels.iter().find(|c| c.len() < num_frames) {
            return Err(AudioError::BufferTooShort {
                required: num_frames,
                available: short.len(),
            });
        }
        self.sink
            .write_frames(channels, num_frames)
            .map_err(AudioError::Codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ChannelLayout, LayoutTag, MapResolution};
    use pretty_assertions::assert_eq;
    use std::{fmt, io};

    /// Channel `c`, frame `f` decodes to `c * 1000 + f`
    struct RampCodec {
        description: StreamDescription,
    }

    impl RampCodec {
        fn new(num_channels: u32, length: u64) -> Self {
            Self {
                description: StreamDescription::new(48_000., num_channels, 32, true, length),
            }
        }
    }

    impl SampleCodec for RampCodec {
        type Error = io::Error;

        fn description(&self) -> &StreamDescription {
            &self.description
        }

        fn read_frames(
            &mut self,
            start_frame: u64,
            frame_count: usize,
            channels: &mut [Vec<f32>],
        ) -> Result<usize, Self::Error> {
            if start_frame == 999 {
                return Err(io::Error::other("corrupt packet"));
            }
            for (c, channel) in channels.iter_mut().enumerate() {
                for (f, sample) in channel[..frame_count].iter_mut().enumerate() {
                    *sample = (c * 1000) as f32 + (start_frame as usize + f) as f32;
                }
            }
            Ok(frame_count)
        }
    }

    #[test]
    fn file_order_without_layout() {
        let mut reader = AudioReader::new(RampCodec::new(2, 100));
        let mut left = [9.0; 4];
        let mut right = [9.0; 4];
        reader
            .read_samples(&mut [&mut left, &mut right], 1, 10, 3)
            .unwrap();
        assert_eq!(left, [9.0, 10.0, 11.0, 12.0]);
        assert_eq!(right, [9.0, 1010.0, 1011.0, 1012.0]);
        assert_eq!(reader.channel_map().resolution(), MapResolution::Identity);
    }

    #[test]
    fn channels_follow_the_layout() {
        let mut codec = RampCodec::new(6, 100);
        codec.description = codec
            .description
            .with_channel_layout(ChannelLayout::from_tag(LayoutTag::MPEG_5_1_D));
        let mut reader = AudioReader::new(codec);
        let mut buffers = [[0.0f32; 1]; 6];
        {
            let mut dest: Vec<&mut [f32]> = buffers.iter_mut().map(|b| &mut b[..]).collect();
            reader.read_samples(&mut dest, 0, 0, 1).unwrap();
        }
        // file order C L R Ls Rs LFE, delivered as L R C LFE Ls Rs
        let firsts: Vec<f32> = buffers.iter().map(|b| b[0]).collect();
        assert_eq!(firsts, vec![1000.0, 2000.0, 0.0, 5000.0, 3000.0, 4000.0]);
    }

    #[test]
    fn frames_past_the_end_are_silent() {
        let mut reader = AudioReader::new(RampCodec::new(1, 10));
        let mut mono = [9.0; 4];
        reader.read_samples(&mut [&mut mono], 0, 8, 4).unwrap();
        assert_eq!(mono, [8.0, 9.0, 0.0, 0.0]);

        reader.read_samples(&mut [&mut mono], 0, 50, 4).unwrap();
        assert_eq!(mono, [0.0; 4]);
    }

    #[test]
    fn extra_destination_channels_are_silent() {
        let mut reader = AudioReader::new(RampCodec::new(1, 10));
        let mut first = [9.0; 2];
        let mut second = [9.0; 2];
        reader
            .read_samples(&mut [&mut first, &mut second], 0, 0, 2)
            .unwrap();
        assert_eq!(first, [0.0, 1.0]);
        assert_eq!(second, [0.0, 0.0]);
    }

    #[test]
    fn reader_errors() {
        let mut reader = AudioReader::new(RampCodec::new(1, 2000));
        let mut short = [0.0; 2];
        let err = reader.read_samples(&mut [&mut short], 1, 0, 2).unwrap_err();
        assert!(matches!(
            err,
            AudioError::BufferTooShort {
                required: 3,
                available: 2
            }
        ));

        let err = reader.read_samples(&mut [&mut short], 0, 999, 2).unwrap_err();
        assert!(matches!(err, AudioError::Codec(_)));
        assert_eq!(err.to_string(), "Codec error: corrupt packet");
    }

    #[derive(Debug)]
    struct Full;

    impl fmt::Display for Full {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("sink full")
        }
    }

    impl std::error::Error for Full {}

    struct VecSink {
        description: StreamDescription,
        written: Vec<Vec<f32>>,
    }

    impl SampleSink for VecSink {
        type Error = Full;

        fn description(&self) -> &StreamDescription {
            &self.description
        }

        fn write_frames(
            &mut self,
            channels: &[&[f32]],
            frame_count: usize,
        ) -> Result<(), Self::Error> {
            if self.written.len() > 1 {
                return Err(Full);
            }
            self.written
                .extend(channels.iter().map(|c| c[..frame_count].to_vec()));
            Ok(())
        }
    }

    #[test]
    fn writer_checks_shape() {
        let mut writer = AudioWriter::new(VecSink {
            description: StreamDescription::new(44_100., 2, 16, false, 0),
            written: Vec::new(),
        });

        let err = writer.write_samples(&[&[0.5]], 1).unwrap_err();
        assert!(matches!(
            err,
            AudioError::ChannelCount {
                expected: 2,
                actual: 1
            }
        ));

        let err = writer.write_samples(&[&[0.5], &[]], 1).unwrap_err();
        assert!(matches!(err, AudioError::BufferTooShort { .. }));

        writer
            .write_samples(&[&[0.5, 0.25], &[-0.5, 1.0]], 1)
            .unwrap();
        let err = writer.write_samples(&[&[0.0], &[0.0]], 1).unwrap_err();
        assert_eq!(err.to_string(), "Codec error: sink full");

        let sink = writer.into_inner();
        assert_eq!(sink.written, vec![vec![0.5], vec![-0.5]]);
    }
}

use cafmeta::{
    layout::{LayoutTag, MapResolution},
    stream::{AudioReader, SampleCodec, StreamDescription, describe},
};
use pretty_assertions::assert_eq;
use std::{convert::Infallible, io::Cursor};

fn chunk(code: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = code.to_vec();
    out.extend((payload.len() as i64).to_be_bytes());
    out.extend(payload);
    out
}

/// 16-bit big-endian PCM with the given layout tag; frame `f`, channel `c` holds `100 * c + f`
fn pcm_file(tag: LayoutTag, channels: u32, frames: u32) -> Vec<u8> {
    let mut desc = 48_000f64.to_be_bytes().to_vec();
    desc.extend(b"lpcm");
    for value in [0, channels * 2, 1, channels, 16] {
        desc.extend(value.to_be_bytes());
    }

    let mut chan = tag.value().to_be_bytes().to_vec();
    chan.extend([0; 8]);

    let mut data = 0u32.to_be_bytes().to_vec();
    for frame in 0..frames {
        for channel in 0..channels {
            data.extend(((100 * channel + frame) as i16).to_be_bytes());
        }
    }

    let mut out = b"caff\0\x01\0\0".to_vec();
    out.extend(chunk(b"desc", &desc));
    out.extend(chunk(b"chan", &chan));
    out.extend(chunk(b"data", &data));
    out
}

/// Decodes the interleaved samples of a whole `data` chunk
struct PcmCodec {
    description: StreamDescription,
    samples: Vec<i16>,
}

impl PcmCodec {
    fn open(bytes: &[u8]) -> Self {
        let description = describe(&mut Cursor::new(bytes)).unwrap().unwrap();
        let channels = description.num_channels() as usize;
        let frames = description.length_in_frames() as usize;
        let data = &bytes[bytes.len() - channels * frames * 2..];
        let samples = data
            .chunks_exact(2)
            .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        Self {
            description,
            samples,
        }
    }
}

impl SampleCodec for PcmCodec {
    type Error = Infallible;

    fn description(&self) -> &StreamDescription {
        &self.description
    }

    fn read_frames(
        &mut self,
        start_frame: u64,
        frame_count: usize,
        channels: &mut [Vec<f32>],
    ) -> Result<usize, Self::Error> {
        let stride = channels.len();
        for (c, channel) in channels.iter_mut().enumerate() {
            for (f, sample) in channel[..frame_count].iter_mut().enumerate() {
                let frame = start_frame as usize + f;
                *sample = f32::from(self.samples[frame * stride + c]);
            }
        }
        Ok(frame_count)
    }
}

#[test]
fn surround_file_is_delivered_in_canonical_order() {
    let bytes = pcm_file(LayoutTag::MPEG_5_1_D, 6, 8);
    let codec = PcmCodec::open(&bytes);
    assert_eq!(codec.description().length_in_frames(), 8);
    assert_eq!(codec.description().bits_per_sample(), 16);

    let mut reader = AudioReader::new(codec);
    assert_eq!(reader.channel_map().resolution(), MapResolution::Layout);

    let mut buffers = vec![vec![0.0f32; 2]; 6];
    let mut dest: Vec<&mut [f32]> = buffers.iter_mut().map(Vec::as_mut_slice).collect();
    reader.read_samples(&mut dest, 0, 7, 2).unwrap();

    // file order C L R Ls Rs LFE; canonical order L R C LFE Ls Rs
    assert_eq!(
        buffers,
        vec![
            vec![107.0, 0.0],
            vec![207.0, 0.0],
            vec![7.0, 0.0],
            vec![507.0, 0.0],
            vec![307.0, 0.0],
            vec![407.0, 0.0],
        ]
    );
}

#[test]
fn layout_for_the_wrong_channel_count_keeps_file_order() {
    let bytes = pcm_file(LayoutTag::STEREO, 3, 4);
    let mut reader = AudioReader::new(PcmCodec::open(&bytes));
    assert_eq!(reader.channel_map().resolution(), MapResolution::Degraded);

    let mut buffers = vec![vec![0.0f32; 1]; 4];
    let mut dest: Vec<&mut [f32]> = buffers.iter_mut().map(Vec::as_mut_slice).collect();
    reader.read_samples(&mut dest, 0, 1, 1).unwrap();
    assert_eq!(buffers, vec![vec![1.0], vec![101.0], vec![201.0], vec![0.0]]);
}

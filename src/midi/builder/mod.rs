mod format;
pub use format::*;

pub mod chunk;

use super::{MidiFile, Timing, Track};
use crate::{
    MidiError,
    reader::{ReadResult, ReaderError, ReaderErrorKind},
};
use chunk::ChunkEvent;

/// A builder used to create a new [`MidiFile`] from its chunks.
///
/// The header may arrive before or after the tracks.
#[derive(Default)]
pub struct MidiFileBuilder {
    format: Option<FormatType>,
    timing: Option<Timing>,
    tracks: Vec<Track>,
    unknown_chunks: usize,
}

impl MidiFileBuilder {
    /// Handles a chunk of a midi file that ended at `position`.
    ///
    /// Errors inside a track report their position relative to the track payload.
    pub fn handle_chunk(&mut self, position: u64, chunk: ChunkEvent) -> ReadResult<()> {
        match chunk {
            ChunkEvent::Header(h) => {
                if self.timing.is_some() {
                    return Err(ReaderError::new(
                        position,
                        ReaderErrorKind::midi(MidiError::DuplicateHeader),
                    ));
                }
                self.format = Some(h.format_type());
                self.timing = Some(h.timing());
            }
            ChunkEvent::Track(raw) => {
                let track = Track::parse(&raw.0)?;
                self.tracks.push(track);
            }
            ChunkEvent::Unknown { .. } => self.unknown_chunks += 1,
            ChunkEvent::Eof => {}
        }
        Ok(())
    }

    /// Attempts to finish the midifile from the provided chunks.
    pub fn build(self) -> Result<MidiFile, MidiError> {
        let (Some(format), Some(timing)) = (self.format, self.timing) else {
            return Err(MidiError::MissingHeader);
        };
        if format == FormatType::SingleMultiChannel && self.tracks.len() > 1 {
            return Err(MidiError::MultipleTracksForSingleMultiChannel);
        }
        #[cfg(feature = "tracing")]
        if self.unknown_chunks > 0 {
            tracing::debug!("skipped {} unknown MIDI chunks", self.unknown_chunks);
        }

        Ok(MidiFile {
            format,
            timing,
            tracks: self.tracks,
        })
    }
}

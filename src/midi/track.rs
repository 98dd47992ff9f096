use crate::{
    MidiError,
    midi::MetaMessage,
    reader::{ByteReader, ReadResult, ReaderError, ReaderErrorKind},
};

/// A channel voice or mode message, kept undecoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelMessage {
    status: u8,
    data: [u8; 2],
}

impl ChannelMessage {
    /// The status byte (message kind in the high nibble, channel in the low nibble)
    pub const fn status(&self) -> u8 {
        self.status
    }
    /// Zero-based channel number
    pub const fn channel(&self) -> u8 {
        self.status & 0x0F
    }
    /// The data bytes. Program change and channel pressure only use the first.
    pub const fn data(&self) -> [u8; 2] {
        self.data
    }
}

/// Any message that may appear in a track chunk
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackMessage {
    /// `8n`..`En`
    Channel(ChannelMessage),
    /// `F0` or `F7`, with the payload as stored
    SystemExclusive(Vec<u8>),
    /// `FF`
    Meta(MetaMessage),
}

#[doc = r#"
A message paired with its time in ticks since the start of its track
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ticked<T> {
    accumulated_ticks: u64,
    event: T,
}

impl<T> Ticked<T> {
    /// Pair an event with a tick position
    pub const fn new(accumulated_ticks: u64, event: T) -> Self {
        Self {
            accumulated_ticks,
            event,
        }
    }
    /// Ticks since the start of the track
    pub const fn accumulated_ticks(&self) -> u64 {
        self.accumulated_ticks
    }
    /// The event itself
    pub const fn event(&self) -> &T {
        &self.event
    }
    /// Unwrap the event
    pub fn into_event(self) -> T {
        self.event
    }
}

/// The decoded events of one `MTrk` chunk
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<Ticked<TrackMessage>>,
}

impl Track {
    /// Create a track from pre-timed events
    pub fn new(events: Vec<Ticked<TrackMessage>>) -> Self {
        Self { events }
    }

    /// The events, in file order
    pub fn events(&self) -> &[Ticked<TrackMessage>] {
        &self.events
    }

    pub(crate) fn into_events(self) -> Vec<Ticked<TrackMessage>> {
        self.events
    }

    /// Decode the payload of an `MTrk` chunk.
    ///
    /// Decoding stops at an end-of-track meta event or at the end of the payload.
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = ByteReader::from_byte_slice(bytes);
        let mut events = Vec::new();
        let mut ticks: u64 = 0;
        let mut running_status: Option<u8> = None;

        while !reader.is_exhausted() {
            ticks += u64::from(reader.read_vlq()?);
            let position = reader.position();
            let byte = reader.read_u8()?;

            let message = match byte {
                0x00..=0x7F => {
                    let Some(status) = running_status else {
                        return Err(midi_error(position, MidiError::MissingStatus(byte)));
                    };
                    TrackMessage::Channel(read_channel_message(&mut reader, status, Some(byte))?)
                }
                0x80..=0xEF => {
                    running_status = Some(byte);
                    TrackMessage::Channel(read_channel_message(&mut reader, byte, None)?)
                }
                0xF0 | 0xF7 => {
                    running_status = None;
                    let len = reader.read_vlq()?;
                    TrackMessage::SystemExclusive(reader.read_bytes(u64::from(len))?)
                }
                0xFF => {
                    running_status = None;
                    let kind = reader.read_u8()?;
                    let len = reader.read_vlq()?;
                    let data = reader.read_bytes(u64::from(len))?;
                    let meta = MetaMessage::parse(kind, data)
                        .map_err(|e| midi_error(position, e))?;
                    if meta == MetaMessage::EndOfTrack {
                        break;
                    }
                    TrackMessage::Meta(meta)
                }
                _ => return Err(midi_error(position, MidiError::UnexpectedStatus(byte))),
            };
            events.push(Ticked::new(ticks, message));
        }

        Ok(Self { events })
    }
}

fn read_channel_message<R: std::io::Read + std::io::Seek>(
    reader: &mut ByteReader<R>,
    status: u8,
    first: Option<u8>,
) -> ReadResult<ChannelMessage> {
    let mut data_byte = |given: Option<u8>| -> ReadResult<u8> {
        let position = reader.position();
        let byte = match given {
            Some(b) => b,
            None => reader.read_u8()?,
        };
        if byte > 0x7F {
            return Err(midi_error(position, MidiError::UnexpectedStatus(byte)));
        }
        Ok(byte)
    };

    let d1 = data_byte(first)?;
    let d2 = match status & 0xF0 {
        0xC0 | 0xD0 => 0,
        _ => data_byte(None)?,
    };
    Ok(ChannelMessage {
        status,
        data: [d1, d2],
    })
}

fn midi_error(position: u64, error: MidiError) -> ReaderError {
    ReaderError::new(position, ReaderErrorKind::midi(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::{KeySignature, Tempo};
    use pretty_assertions::assert_eq;

    #[test]
    fn running_status_and_meta_events() {
        let bytes = [
            0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo 120
            0x00, 0x90, 0x3C, 0x64, // note on
            0x60, 0x3C, 0x00, // running status note on, velocity 0
            0x81, 0x40, 0xFF, 0x59, 0x02, 0xFE, 0x01, // key signature at +192
            0x00, 0xFF, 0x2F, 0x00, // end of track
            0x00, 0x90, 0x3C, 0x64, // ignored
        ];
        let track = Track::parse(&bytes).unwrap();
        let events = track.events();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            Ticked::new(0, TrackMessage::Meta(MetaMessage::Tempo(Tempo::DEFAULT)))
        );
        assert_eq!(events[2].accumulated_ticks(), 96);
        let TrackMessage::Channel(cm) = events[2].event() else {
            panic!("expected a channel message");
        };
        assert_eq!(cm.status(), 0x90);
        assert_eq!(cm.data(), [0x3C, 0x00]);
        assert_eq!(
            events[3],
            Ticked::new(
                288,
                TrackMessage::Meta(MetaMessage::KeySignature(KeySignature::new(-2, true)))
            )
        );
    }

    #[test]
    fn program_change_takes_one_data_byte() {
        let bytes = [0x00, 0xC0, 0x05, 0x00, 0x06];
        let track = Track::parse(&bytes).unwrap();
        assert_eq!(track.events().len(), 2);
    }

    #[test]
    fn data_byte_without_status_is_rejected() {
        let err = Track::parse(&[0x00, 0x3C, 0x64]).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(crate::ParseError::Midi(MidiError::MissingStatus(0x3C)))
        ));
    }

    #[test]
    fn truncated_event_is_out_of_bounds() {
        let err = Track::parse(&[0x00, 0xFF, 0x51, 0x03, 0x07]).unwrap_err();
        assert!(err.is_out_of_bounds());
    }
}

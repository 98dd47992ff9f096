use crate::MidiError;

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(u16),

    /// The midi file's delta times are defined using an SMPTE frame rate and ticks per frame
    Smpte {
        /// Frames per second
        fps: SmpteFps,
        /// Subdivisions of one frame
        ticks_per_frame: u8,
    },
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(tpqn & 0x7FFF)
    }

    /// Decode the division word of an `MThd` chunk
    pub(crate) fn from_division(bytes: [u8; 2]) -> Result<Self, MidiError> {
        if bytes[0] >> 7 == 0 {
            return Ok(Self::new_ticks_per_quarter_note(u16::from_be_bytes(bytes)));
        }
        //Bits 14 thru 8 contain one of the four values -24, -25, -29, or -30
        let byte = bytes[0] as i8;
        let fps = match byte {
            -24 => SmpteFps::TwentyFour,
            -25 => SmpteFps::TwentyFive,
            -29 => SmpteFps::TwentyNine,
            -30 => SmpteFps::Thirty,
            _ => return Err(MidiError::SmpteFrameRate(byte)),
        };
        Ok(Self::Smpte {
            fps,
            ticks_per_frame: bytes[1],
        })
    }
}

/// The possible FPS (Frames Per Second) for MIDI files
///
/// `TwentyNine` is the 29.97 fps drop-frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (30000/1001)
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

#[test]
fn division_word_decodes() {
    assert_eq!(
        Timing::from_division([0x01, 0xE0]).unwrap(),
        Timing::TicksPerQuarterNote(480)
    );
    assert_eq!(
        Timing::from_division([0xE2, 40]).unwrap(),
        Timing::Smpte {
            fps: SmpteFps::Thirty,
            ticks_per_frame: 40
        }
    );
    assert_eq!(
        Timing::from_division([0xF0, 4]),
        Err(MidiError::SmpteFrameRate(-16))
    );
}

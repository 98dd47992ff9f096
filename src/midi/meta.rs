#![doc = r#"
Meta events carried by a MIDI track

Only three meta events matter for musical metadata:

- `FF 51 03 tt tt tt` sets the tempo in microseconds per quarter note
- `FF 58 04 nn dd cc bb` sets the time signature, with the denominator as a power of two
- `FF 59 02 sf mi` sets the key signature as a count of sharps (positive) or flats (negative)
  and a major (0) / minor (1) flag

Everything else is kept as [`MetaMessage::Other`].
"#]

use crate::MidiError;

const TEMPO: u8 = 0x51;
const TIME_SIGNATURE: u8 = 0x58;
const KEY_SIGNATURE: u8 = 0x59;
const END_OF_TRACK: u8 = 0x2F;

/// A tempo change, stored the way the file stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Tempo {
    /// 120 beats per minute.
    pub const DEFAULT: Self = Self(500_000);

    /// Create a tempo from microseconds per quarter note.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note & 0x00FF_FFFF)
    }

    /// Create a tempo from the three payload bytes of the meta event.
    pub const fn new_from_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Seconds per quarter note
    pub fn seconds_per_quarter_note(&self) -> f64 {
        f64::from(self.0) / 1_000_000.
    }

    /// Beats per minute, or `None` when the tempo is zero.
    pub fn beats_per_minute(&self) -> Option<f64> {
        let seconds = self.seconds_per_quarter_note();
        if seconds > 0. {
            Some(60. / seconds)
        } else {
            None
        }
    }
}

/// A time signature change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    numerator: u8,
    denominator_power: u8,
    clocks_per_click: u8,
    notated_32nds_per_quarter: u8,
}

impl TimeSignature {
    /// Create a time signature from its four payload bytes
    pub const fn new(
        numerator: u8,
        denominator_power: u8,
        clocks_per_click: u8,
        notated_32nds_per_quarter: u8,
    ) -> Self {
        Self {
            numerator,
            denominator_power,
            clocks_per_click,
            notated_32nds_per_quarter,
        }
    }

    /// Beats per bar
    pub const fn numerator(&self) -> u8 {
        self.numerator
    }

    /// The beat unit, `2^dd`. Zero if the exponent does not fit.
    pub const fn denominator(&self) -> u32 {
        match 1u32.checked_shl(self.denominator_power as u32) {
            Some(d) => d,
            None => 0,
        }
    }

    /// MIDI clocks per metronome click
    pub const fn clocks_per_click(&self) -> u8 {
        self.clocks_per_click
    }

    /// Notated 32nd notes per MIDI quarter note
    pub const fn notated_32nds_per_quarter(&self) -> u8 {
        self.notated_32nds_per_quarter
    }
}

/// A key signature change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    sharps_or_flats: i8,
    minor: bool,
}

const MAJOR_KEYS: [&str; 15] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
];
const MINOR_KEYS: [&str; 15] = [
    "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#", "A#",
];

impl KeySignature {
    /// Positive counts are sharps, negative counts are flats.
    pub const fn new(sharps_or_flats: i8, minor: bool) -> Self {
        Self {
            sharps_or_flats,
            minor,
        }
    }

    /// The signed count as stored in the file, not clamped
    pub const fn sharps_or_flats(&self) -> i8 {
        self.sharps_or_flats
    }

    /// True for a major key
    pub const fn is_major(&self) -> bool {
        !self.minor
    }

    /// Position on the circle of fifths, from 0 (seven flats) to 14 (seven sharps)
    pub fn circle_of_fifths_index(&self) -> usize {
        (i16::from(self.sharps_or_flats).clamp(-7, 7) + 7) as usize
    }

    /// The key's name, e.g. `"C"`, `"F#"` or `"Dm"`.
    pub fn name(&self) -> String {
        let index = self.circle_of_fifths_index();
        if self.minor {
            format!("{}m", MINOR_KEYS[index])
        } else {
            MAJOR_KEYS[index].to_owned()
        }
    }
}

/// A decoded meta event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaMessage {
    /// `FF 51`
    Tempo(Tempo),
    /// `FF 58`
    TimeSignature(TimeSignature),
    /// `FF 59`
    KeySignature(KeySignature),
    /// `FF 2F`
    EndOfTrack,
    /// Any other meta event, with its raw payload
    Other {
        /// The meta type byte
        kind: u8,
        /// The payload
        data: Vec<u8>,
    },
}

impl MetaMessage {
    /// Interpret a meta event from its type byte and payload.
    pub fn parse(kind: u8, data: Vec<u8>) -> Result<Self, MidiError> {
        let len = data.len() as u32;
        let bad_len = move || MidiError::MetaLength { kind, len };
        Ok(match kind {
            TEMPO => {
                let bytes: [u8; 3] = data.as_slice().try_into().map_err(|_| bad_len())?;
                Self::Tempo(Tempo::new_from_bytes(bytes))
            }
            TIME_SIGNATURE => {
                let [n, d, c, b]: [u8; 4] = data.as_slice().try_into().map_err(|_| bad_len())?;
                Self::TimeSignature(TimeSignature::new(n, d, c, b))
            }
            KEY_SIGNATURE => {
                let [sf, mi]: [u8; 2] = data.as_slice().try_into().map_err(|_| bad_len())?;
                Self::KeySignature(KeySignature::new(sf as i8, mi != 0))
            }
            END_OF_TRACK => Self::EndOfTrack,
            _ => Self::Other { kind, data },
        })
    }
}

#[test]
fn tempo_to_bpm() {
    assert_eq!(Tempo::new(500_000).beats_per_minute(), Some(120.));
    assert_eq!(Tempo::new(600_000).beats_per_minute(), Some(100.));
    assert_eq!(Tempo::new(0).beats_per_minute(), None);
    assert_eq!(Tempo::new_from_bytes([0x07, 0xA1, 0x20]), Tempo::DEFAULT);
}

#[test]
fn key_names_follow_the_circle_of_fifths() {
    assert_eq!(KeySignature::new(0, false).name(), "C");
    assert_eq!(KeySignature::new(0, true).name(), "Am");
    assert_eq!(KeySignature::new(-1, false).name(), "F");
    assert_eq!(KeySignature::new(-1, true).name(), "Dm");
    assert_eq!(KeySignature::new(-6, true).name(), "Ebm");
    assert_eq!(KeySignature::new(7, false).name(), "C#");
    assert_eq!(KeySignature::new(7, true).name(), "A#m");
}

#[test]
fn key_signature_counts_are_clamped() {
    assert_eq!(KeySignature::new(12, false).name(), "C#");
    assert_eq!(KeySignature::new(-128, false).name(), "Cb");
    assert_eq!(KeySignature::new(i8::MAX, true).circle_of_fifths_index(), 14);
}

#[test]
fn time_signature_denominator_is_a_power_of_two() {
    assert_eq!(TimeSignature::new(6, 3, 24, 8).denominator(), 8);
    assert_eq!(TimeSignature::new(4, 2, 24, 8).denominator(), 4);
    assert_eq!(TimeSignature::new(4, 40, 24, 8).denominator(), 0);
}

#[test]
fn fixed_size_meta_events_check_their_length() {
    assert_eq!(
        MetaMessage::parse(0x51, vec![0x07, 0xA1]),
        Err(MidiError::MetaLength { kind: 0x51, len: 2 })
    );
    assert_eq!(
        MetaMessage::parse(0x03, b"Piano".to_vec()),
        Ok(MetaMessage::Other {
            kind: 0x03,
            data: b"Piano".to_vec()
        })
    );
}

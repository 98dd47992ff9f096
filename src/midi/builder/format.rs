use crate::MidiError;

#[doc = r#"
The arrangement of tracks within a MIDI file, taken from the first word of `MThd`.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel,
    /// Format 1
    Simultaneous,
    /// Format 2
    SequentiallyIndependent,
}

impl FormatType {
    pub(crate) const fn from_word(word: u16) -> Result<Self, MidiError> {
        match word {
            0 => Ok(Self::SingleMultiChannel),
            1 => Ok(Self::Simultaneous),
            2 => Ok(Self::SequentiallyIndependent),
            other => Err(MidiError::InvalidFormat(other)),
        }
    }
}

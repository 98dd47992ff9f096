use crate::layout::{ChannelRole, LayoutTag};
use thiserror::Error;

#[doc = r#"
Any error that arises from malformed bytes rather than from the stream itself
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The embedded MIDI stream is malformed
    #[error("MIDI: {0}")]
    Midi(#[from] MidiError),
    /// A container chunk is malformed
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
}

/// Problems found while decoding an embedded Standard MIDI File
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MidiError {
    /// No `MThd` chunk was found before the first track or the end of data
    #[error("Missing MThd header chunk")]
    MissingHeader,
    /// More than one `MThd` chunk
    #[error("Duplicate MThd header chunk")]
    DuplicateHeader,
    /// The `MThd` chunk is shorter than six bytes
    #[error("Header chunk length {0} is too short")]
    HeaderLength(u32),
    /// The format word is not 0, 1 or 2
    #[error("Invalid file format {0}")]
    InvalidFormat(u16),
    /// A format 0 file declared (or contained) more than one track
    #[error("Format 0 file with more than one track")]
    MultipleTracksForSingleMultiChannel,
    /// The SMPTE frame rate byte is not one of -24, -25, -29 or -30
    #[error("Invalid SMPTE frame rate {0}")]
    SmpteFrameRate(i8),
    /// A variable length quantity ran longer than four bytes
    #[error("Variable length quantity exceeds four bytes")]
    VariableLengthOverflow,
    /// A data byte appeared where a status byte was required
    #[error("Data byte {0:#04x} without a running status")]
    MissingStatus(u8),
    /// A status byte that a file track may not contain
    #[error("Unexpected status byte {0:#04x}")]
    UnexpectedStatus(u8),
    /// A tempo, time signature or key signature event has the wrong payload size
    #[error("Meta event {kind:#04x} has invalid length {len}")]
    MetaLength {
        /// Meta event type byte
        kind: u8,
        /// Declared payload length
        len: u32,
    },
}

/// Problems with an individual container chunk
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    /// The `desc` chunk is too small to hold a description record
    #[error("Description chunk of {0} bytes is too small")]
    DescriptionSize(i64),
}

#[doc = r#"
Raised when a channel layout cannot be reconciled with the canonical role set it implies.

This never comes from untrusted input alone: it means the static role tables disagree
with themselves.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A role from the declared channel order is missing from the canonical role set
    #[error("Channel {channel} has role {role:?} which is not part of the layout {tag}")]
    RoleNotFound {
        /// File channel index
        channel: usize,
        /// The role declared for that channel
        role: ChannelRole,
        /// The layout that produced the role
        tag: LayoutTag,
    },
}

#[doc = r#"
Errors from [`AudioReader`](crate::stream::AudioReader) and
[`AudioWriter`](crate::stream::AudioWriter), generic over the codec's own error.
"#]
#[derive(Debug, Error)]
pub enum AudioError<E> {
    /// The codec failed
    #[error("Codec error: {0}")]
    Codec(#[source] E),
    /// The caller passed the wrong number of channel buffers
    #[error("Expected {expected} channels, got {actual}")]
    ChannelCount {
        /// Channels the stream has
        expected: usize,
        /// Buffers supplied
        actual: usize,
    },
    /// A channel buffer cannot hold the requested frames
    #[error("Channel buffer holds {available} samples, {required} needed")]
    BufferTooShort {
        /// Samples needed
        required: usize,
        /// Samples the shortest buffer holds
        available: usize,
    },
}

use crate::{ChunkError, MidiError, ParseError};
use std::io;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while reading a container or an embedded MIDI stream
"#]
#[derive(Debug, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: u64,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The underlying stream failed
    #[error("I/O {0}")]
    Io(#[from] io::Error),
    /// Parsing errors
    #[error("Parsing {0}")]
    ParseError(#[from] ParseError),
    /// Reading out of bounds.
    #[error("Read out of bounds!")]
    OutOfBounds,
}

impl ReaderErrorKind {
    pub(crate) const fn midi(midi_err: MidiError) -> Self {
        Self::ParseError(ParseError::Midi(midi_err))
    }
    pub(crate) const fn chunk(chunk_err: ChunkError) -> Self {
        Self::ParseError(ParseError::Chunk(chunk_err))
    }
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: u64, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if out of bounds or unexpected end of stream
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }
    /// True if the underlying stream reported a failure
    pub const fn is_io(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::Io(_))
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// The parse failure, if this is one
    pub fn parse_error(&self) -> Option<&ParseError> {
        match &self.kind {
            ReaderErrorKind::ParseError(e) => Some(e),
            _ => None,
        }
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Create a new out of bounds error
    pub const fn oob(position: u64) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }

    pub(crate) fn io(position: u64, error: io::Error) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::Io(error),
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

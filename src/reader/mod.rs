#![doc = r#"
Sequential big-endian reading over any seekable stream.

# Overview

Both the container walker and the embedded MIDI decoder read through a [`ByteReader`].
It tracks the cursor position and the total stream length, so that callers can ask
whether the stream is exhausted without attempting a read.

Reads never consume a partial value: if fewer bytes remain than a value needs,
the reader returns an out-of-bounds [`ReaderError`] and the cursor stays where it was.
Seeking past the end is allowed and simply leaves the reader exhausted.
"#]

mod error;
pub use error::*;

use std::io::{self, Read, Seek, SeekFrom};

/// A big-endian cursor over a `Read + Seek` source.
pub struct ByteReader<R> {
    inner: R,
    position: u64,
    len: u64,
}

impl<'a> ByteReader<io::Cursor<&'a [u8]>> {
    /// Create a reader over an in-memory slice
    pub fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self {
            inner: io::Cursor::new(bytes),
            position: 0,
            len: bytes.len() as u64,
        }
    }
}

impl<R: Read + Seek> ByteReader<R> {
    /// Wrap a stream. The reader starts at the stream's current position.
    pub fn new(mut inner: R) -> ReadResult<Self> {
        let position = inner
            .stream_position()
            .map_err(|e| ReaderError::io(0, e))?;
        let len = inner
            .seek(SeekFrom::End(0))
            .map_err(|e| ReaderError::io(position, e))?;
        inner
            .seek(SeekFrom::Start(position))
            .map_err(|e| ReaderError::io(position, e))?;
        Ok(Self {
            inner,
            position,
            len,
        })
    }

    /// The current cursor position
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// The total length of the underlying stream
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// True if the underlying stream has no bytes at all
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes left between the cursor and the end of the stream
    pub const fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.position)
    }

    /// True once the cursor is at or past the end of the stream
    pub const fn is_exhausted(&self) -> bool {
        self.position >= self.len
    }

    /// Move the cursor to an absolute position. Positions past the end are allowed.
    pub fn set_position(&mut self, position: u64) -> ReadResult<()> {
        self.inner
            .seek(SeekFrom::Start(position))
            .map_err(|e| ReaderError::io(self.position, e))?;
        self.position = position;
        Ok(())
    }

    /// Advance the cursor by `count` bytes without reading them.
    pub fn skip(&mut self, count: u64) -> ReadResult<()> {
        let target = self.position.saturating_add(count);
        self.set_position(target)
    }

    /// Returns the wrapped stream
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self, buf: &mut [u8]) -> ReadResult<()> {
        if (buf.len() as u64) > self.remaining() {
            return Err(ReaderError::oob(self.position));
        }
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                let start = self.position;
                // the stream shrank underneath us; resync and report the short read
                self.set_position(start)?;
                Err(ReaderError::oob(start))
            }
            Err(e) => Err(ReaderError::io(self.position, e)),
        }
    }

    /// Read a fixed number of bytes
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut buf = [0; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let [b] = self.read_exact_size()?;
        Ok(b)
    }

    /// Read a big-endian `u16`
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Read a big-endian `u32`
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Read a big-endian `i32`
    pub fn read_i32_be(&mut self) -> ReadResult<i32> {
        self.read_exact_size().map(i32::from_be_bytes)
    }

    /// Read a big-endian `i64`
    pub fn read_i64_be(&mut self) -> ReadResult<i64> {
        self.read_exact_size().map(i64::from_be_bytes)
    }

    /// Read a big-endian IEEE 754 single
    pub fn read_f32_be(&mut self) -> ReadResult<f32> {
        self.read_exact_size().map(f32::from_be_bytes)
    }

    /// Read a big-endian IEEE 754 double
    pub fn read_f64_be(&mut self) -> ReadResult<f64> {
        self.read_exact_size().map(f64::from_be_bytes)
    }

    /// Read exactly `count` bytes.
    pub fn read_bytes(&mut self, count: u64) -> ReadResult<Vec<u8>> {
        if count > self.remaining() {
            return Err(ReaderError::oob(self.position));
        }
        let mut buf = vec![0; count as usize];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Read a NUL-terminated string. Invalid UTF-8 is replaced lossily.
    ///
    /// A string that runs into the end of the stream without a terminator
    /// is an out-of-bounds error, and the cursor is left at its start.
    pub fn read_cstring(&mut self) -> ReadResult<String> {
        self.read_cstring_before(self.len)
    }

    /// Like [`read_cstring`](Self::read_cstring), but the terminator must come before `end`.
    pub fn read_cstring_before(&mut self, end: u64) -> ReadResult<String> {
        let start = self.position;
        let mut bytes = Vec::new();
        loop {
            if self.position >= end {
                let e = ReaderError::oob(self.position);
                self.set_position(start)?;
                return Err(e);
            }
            match self.read_u8() {
                Ok(0) => break,
                Ok(b) => bytes.push(b),
                Err(e) => {
                    self.set_position(start)?;
                    return Err(e);
                }
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a MIDI variable-length quantity (at most four bytes).
    ///
    /// On failure the cursor is left at the start of the quantity.
    pub fn read_vlq(&mut self) -> ReadResult<u32> {
        let start = self.position;
        let mut value: u32 = 0;
        for _ in 0..4 {
            let byte = match self.read_u8() {
                Ok(byte) => byte,
                Err(e) => {
                    self.set_position(start)?;
                    return Err(e);
                }
            };
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        self.set_position(start)?;
        Err(ReaderError::new(
            start,
            ReaderErrorKind::midi(crate::MidiError::VariableLengthOverflow),
        ))
    }
}

#[test]
fn reads_big_endian_values() {
    let bytes = [
        0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    ];
    let mut reader = ByteReader::from_byte_slice(&bytes);
    assert_eq!(reader.read_u16_be().unwrap(), 1);
    assert_eq!(reader.read_u32_be().unwrap(), 2);
    assert_eq!(reader.read_i64_be().unwrap(), -1);
    assert!(reader.is_exhausted());
}

#[test]
fn short_read_does_not_move_cursor() {
    let mut reader = ByteReader::from_byte_slice(&[0x01, 0x02, 0x03]);
    let err = reader.read_u32_be().unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(reader.position(), 0);
    assert_eq!(reader.read_u16_be().unwrap(), 0x0102);
}

#[test]
fn cstring_stops_at_nul() {
    let mut reader = ByteReader::from_byte_slice(b"title\0Song\0tail");
    assert_eq!(reader.read_cstring().unwrap(), "title");
    assert_eq!(reader.read_cstring().unwrap(), "Song");
    assert!(reader.read_cstring().unwrap_err().is_out_of_bounds());
    assert_eq!(reader.position(), 11);
}

#[test]
fn bounded_cstring() {
    let mut reader = ByteReader::from_byte_slice(b"key\0value\0");
    assert_eq!(reader.read_cstring_before(4).unwrap(), "key");
    assert!(reader.read_cstring_before(8).unwrap_err().is_out_of_bounds());
    assert_eq!(reader.position(), 4);
    assert_eq!(reader.read_cstring_before(10).unwrap(), "value");
}

#[test]
fn variable_length_quantities() {
    let mut reader = ByteReader::from_byte_slice(&[0x00, 0x7F, 0x81, 0x00, 0xFF, 0x7F]);
    assert_eq!(reader.read_vlq().unwrap(), 0);
    assert_eq!(reader.read_vlq().unwrap(), 0x7F);
    assert_eq!(reader.read_vlq().unwrap(), 0x80);
    assert_eq!(reader.read_vlq().unwrap(), 0x3FFF);

    let mut reader = ByteReader::from_byte_slice(&[0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
    assert!(!reader.read_vlq().unwrap_err().is_out_of_bounds());
    assert_eq!(reader.position(), 0);

    let mut reader = ByteReader::from_byte_slice(&[0x00, 0x81, 0x82]);
    assert_eq!(reader.read_vlq().unwrap(), 0);
    assert!(reader.read_vlq().unwrap_err().is_out_of_bounds());
    assert_eq!(reader.position(), 1);
}

#[test]
fn seeking_past_the_end_exhausts() {
    let mut reader = ByteReader::from_byte_slice(&[0; 4]);
    reader.skip(100).unwrap();
    assert!(reader.is_exhausted());
    assert_eq!(reader.remaining(), 0);
    assert!(reader.read_u8().unwrap_err().is_out_of_bounds());
}

use crate::{error::SerdeErr, serde::Serde};

pub trait ByteWrite {
    fn write_byte(&mut self, byte: u8);

    fn write_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.write_byte(*byte);
        }
    }
}

/// A growable, seekable byte sink.
///
/// Writing at a position before the end overwrites existing bytes, which is
/// what the "reserve a count, write the body, patch the count" pattern relies on.
pub struct ByteWriter {
    buffer: Vec<u8>,
    position: usize,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn seek(&mut self, position: usize) -> Result<(), SerdeErr> {
        if position > self.buffer.len() {
            return Err(SerdeErr::SeekOutOfBounds {
                position,
                length: self.buffer.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    pub fn seek_end(&mut self) {
        self.position = self.buffer.len();
    }

    /// Write `value` as a placeholder and return the position it starts at
    pub fn reserve<T: Serde>(&mut self, value: &T) -> usize {
        let start = self.position;
        value.ser(self);
        start
    }

    /// Overwrite the value previously reserved at `position`, then return
    /// to the end of the stream
    pub fn patch<T: Serde>(&mut self, position: usize, value: &T) -> Result<(), SerdeErr> {
        let length = value.byte_length();
        if position + length > self.buffer.len() {
            return Err(SerdeErr::SeekOutOfBounds {
                position: position + length,
                length: self.buffer.len(),
            });
        }
        self.seek(position)?;
        value.ser(self);
        self.seek_end();
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWrite for ByteWriter {
    fn write_byte(&mut self, byte: u8) {
        if self.position < self.buffer.len() {
            self.buffer[self.position] = byte;
        } else {
            self.buffer.push(byte);
        }
        self.position += 1;
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let overlap = self.buffer.len().saturating_sub(self.position).min(bytes.len());
        self.buffer[self.position..self.position + overlap].copy_from_slice(&bytes[..overlap]);
        self.buffer.extend_from_slice(&bytes[overlap..]);
        self.position += bytes.len();
    }
}

/// A ByteWrite implementation that only counts
pub struct ByteCounter {
    count: usize,
}

impl ByteCounter {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Default for ByteCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWrite for ByteCounter {
    fn write_byte(&mut self, _byte: u8) {
        self.count += 1;
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.count += bytes.len();
    }
}

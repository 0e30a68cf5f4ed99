use log::warn;

use deltasync_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

use crate::constants::MAX_INPUT_COMMANDS;

/// Client-side queue of single-byte input commands, flushed once per tick
/// as `(count: u8, commands...)`
pub struct InputBuffer {
    commands: Vec<u8>,
    capacity: u8,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(MAX_INPUT_COMMANDS)
    }
}

impl InputBuffer {
    pub fn new(capacity: u8) -> Self {
        Self {
            commands: Vec::with_capacity(capacity as usize),
            capacity,
        }
    }

    /// Queues `command`, returning false if the buffer is full
    pub fn try_push(&mut self, command: u8) -> bool {
        if self.commands.len() >= self.capacity as usize {
            warn!(
                "input buffer full ({} commands), dropping command {}",
                self.capacity, command
            );
            return false;
        }
        self.commands.push(command);
        true
    }

    /// Writes the queued commands and empties the buffer
    pub fn flush(&mut self, writer: &mut dyn ByteWrite) {
        // capacity is at most u8::MAX, so the count fits
        (self.commands.len() as u8).ser(writer);
        writer.write_bytes(&self.commands);
        self.commands.clear();
    }

    /// Reads one flushed batch of commands
    pub fn read(reader: &mut ByteReader) -> Result<Vec<u8>, SerdeErr> {
        let count = u8::de(reader)?;
        Ok(reader.read_bytes(count as usize)?.to_vec())
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

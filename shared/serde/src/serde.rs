use crate::{byte_reader::ByteReader, byte_writer::ByteCounter, byte_writer::ByteWrite, error::SerdeErr};

/// A type that can be written to and read back from the wire.
///
/// Encodings are fixed-width and little-endian; variable-length payloads
/// carry their own length prefix.
pub trait Serde: Sized + Clone + PartialEq {
    /// Append the encoded value to the writer
    fn ser(&self, writer: &mut dyn ByteWrite);

    /// Decode a value, advancing the reader past it
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;

    /// Number of bytes `ser` would write
    fn byte_length(&self) -> usize {
        let mut counter = ByteCounter::new();
        self.ser(&mut counter);
        counter.count()
    }
}

/// Implemented by types whose encoding always has the same size
pub trait ConstByteLength {
    fn const_byte_length() -> usize;
}

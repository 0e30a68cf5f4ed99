use thiserror::Error;

/// Errors that can occur while reading or patching a byte stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The stream ended before a complete value could be read
    #[error("Unexpected end of stream at position {position}: needed {needed} bytes, but only {remaining} remain")]
    UnexpectedEnd {
        position: usize,
        needed: usize,
        remaining: usize,
    },

    /// A bool (or Option tag) byte was neither 0 nor 1
    #[error("Invalid bool byte {value} at position {position}, expected 0 or 1")]
    InvalidBool { value: u8, position: usize },

    /// A length-prefixed string did not hold valid UTF-8
    #[error("Invalid UTF-8 in string payload of {length} bytes")]
    InvalidUtf8 { length: usize },

    /// Attempted to seek past the end of the written stream
    #[error("Cannot seek to position {position}, stream only has {length} bytes")]
    SeekOutOfBounds { position: usize, length: usize },
}

use thiserror::Error;

pub type IndexResult<T> = Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Malformed varint: the input ended with the continuation bit still set")]
    MalformedVarint,
    #[error("Truncated input: {expected} bytes declared, {actual} available")]
    TruncatedInput { expected: usize, actual: usize },
    #[error("Output buffer too small: {needed} bytes needed, capacity is {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
    #[error("Invalid record size: expected {expected} bytes, got {actual}")]
    InvalidRecordSize { expected: usize, actual: usize },
    #[error("Invalid indexed value tag (0x{0:02x}): expected 'l' or 'w'")]
    InvalidIndexedValueTag(u8),
    #[error("Storage backend unavailable ({0})")]
    StorageUnavailable(Box<str>),
}

impl IndexError {
    /// Wrap a backend failure, keeping only its message.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        IndexError::StorageUnavailable(err.to_string().into_boxed_str())
    }
}

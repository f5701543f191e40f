//! Integer status codes and the out-of-band error message, for embeddings
//! that consume the adapter through a plain `(bytes written, i32)` surface
//! where typed errors cannot cross.

use std::cell::RefCell;

use emmi_common::IndexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    /// The caller-supplied output buffer is too small; the error message
    /// carries the required size.
    BufferTooSmall = 1,
    /// Request or response bytes could not be (de)serialized.
    Serialization = 42,
    /// The injected backend failed.
    Backend = 43,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<&IndexError> for ErrorCode {
    fn from(err: &IndexError) -> Self {
        match err {
            IndexError::BufferTooSmall { .. } => ErrorCode::BufferTooSmall,
            IndexError::StorageUnavailable(_) => ErrorCode::Backend,
            IndexError::MalformedVarint
            | IndexError::TruncatedInput { .. }
            | IndexError::InvalidRecordSize { .. }
            | IndexError::InvalidIndexedValueTag(_) => ErrorCode::Serialization,
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Record the message of `err` for [`last_error`] and hand it back, so
/// error paths can tack this on with `map_err`.
pub fn record(err: IndexError) -> IndexError {
    set_last_error(err.to_string());
    err
}

/// Record plus conversion to the integer code, for status-code surfaces.
pub fn record_code(err: IndexError) -> i32 {
    let code = ErrorCode::from(&err).code();
    set_last_error(err.to_string());
    code
}

pub fn set_last_error(msg: impl Into<String>) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = msg.into());
}

/// The last recorded error message, truncated to at most `max_len` bytes
/// on a character boundary.
pub fn last_error(max_len: usize) -> String {
    LAST_ERROR.with(|slot| {
        let msg = slot.borrow();
        let mut end = max_len.min(msg.len());
        while end > 0 && !msg.is_char_boundary(end) {
            end -= 1;
        }
        msg[..end].to_string()
    })
}

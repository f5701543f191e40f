use std::fmt;

use crate::{IndexError, IndexResult};

/// Byte length of a table row identifier.
pub const UID_LENGTH: usize = 32;

/// Identifier of a row in either the Entry Table or the Chain Table.
///
/// Equality and hashing are structural. On the wire a `Uid` is written as
/// its raw bytes when it appears inside a collection; only a standalone
/// top-level record carries a length prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid([u8; UID_LENGTH]);

impl Uid {
    pub fn from_bytes(bytes: &[u8]) -> IndexResult<Self> {
        let inner: [u8; UID_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| IndexError::InvalidRecordSize {
                    expected: UID_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Uid(inner))
    }

    pub fn as_bytes(&self) -> &[u8; UID_LENGTH] {
        &self.0
    }
}

impl From<[u8; UID_LENGTH]> for Uid {
    fn from(bytes: [u8; UID_LENGTH]) -> Self {
        Uid(bytes)
    }
}

impl AsRef<[u8]> for Uid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uid(")?;
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_checks_length() {
        assert!(Uid::from_bytes(&[0u8; 32]).is_ok());
        let err = Uid::from_bytes(&[0u8; 31]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::InvalidRecordSize {
                expected: 32,
                actual: 31
            }
        ));
    }

    #[test]
    fn debug_is_hex() {
        let mut bytes = [0u8; UID_LENGTH];
        bytes[0] = 0xab;
        let uid = Uid::from(bytes);
        assert!(format!("{:?}", uid).starts_with("Uid(ab00"));
    }
}

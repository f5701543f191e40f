use std::fmt;

use bytes::Bytes;

use crate::{IndexError, IndexResult};

macro_rules! byte_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Bytes);

        impl $name {
            pub fn new(bytes: impl Into<Bytes>) -> Self {
                $name(bytes.into())
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn into_bytes(self) -> Bytes {
                self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                $name(bytes.into())
            }
        }

        impl From<&[u8]> for $name {
            fn from(bytes: &[u8]) -> Self {
                $name(Bytes::copy_from_slice(bytes))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(Bytes::copy_from_slice(s.as_bytes()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(", stringify!($name))?;
                for b in self.0.iter() {
                    write!(f, "{:02x}", b)?;
                }
                write!(f, ")")
            }
        }
    };
}

byte_record!(
    /// Opaque encrypted value of an Entry Table row. Its plaintext encodes
    /// the head of the keyword's chain; the adapter never looks inside.
    EntryValue
);
byte_record!(
    /// Opaque encrypted value of a Chain Table row (one linked node of the
    /// chain of indexed values for a keyword).
    ChainValue
);
byte_record!(
    /// A plaintext index key, before the engine hashes it into a `Uid`.
    Keyword
);
byte_record!(
    /// A terminal payload: an application-level data reference, e.g. a
    /// database row identifier.
    Location
);

/// The old/new value pair of a conditional Entry Table write.
///
/// `previous` is the value the writer believes is currently stored; an empty
/// `previous` means the row is expected to be absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpsertEntry {
    pub previous: EntryValue,
    pub new: EntryValue,
}

/// Plaintext payload of a chain node: either a terminal [`Location`] or a
/// [`Keyword`] to chase further.
///
/// The serialized form starts with a one-byte discriminant (`'l'` or `'w'`)
/// followed by the payload; the tag is part of the wire contract.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum IndexedValue {
    Location(Location),
    NextKeyword(Keyword),
}

const LOCATION_TAG: u8 = b'l';
const KEYWORD_TAG: u8 = b'w';

impl IndexedValue {
    pub fn to_vec(&self) -> Vec<u8> {
        let (tag, payload) = match self {
            IndexedValue::Location(location) => (LOCATION_TAG, location.as_ref()),
            IndexedValue::NextKeyword(keyword) => (KEYWORD_TAG, keyword.as_ref()),
        };
        let mut bytes = Vec::with_capacity(1 + payload.len());
        bytes.push(tag);
        bytes.extend_from_slice(payload);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> IndexResult<Self> {
        match bytes.split_first() {
            None => Err(IndexError::TruncatedInput {
                expected: 1,
                actual: 0,
            }),
            Some((&LOCATION_TAG, payload)) => Ok(IndexedValue::Location(Location::from(payload))),
            Some((&KEYWORD_TAG, payload)) => Ok(IndexedValue::NextKeyword(Keyword::from(payload))),
            Some((&tag, _)) => Err(IndexError::InvalidIndexedValueTag(tag)),
        }
    }

    pub fn is_location(&self) -> bool {
        matches!(self, IndexedValue::Location(_))
    }

    pub fn as_location(&self) -> Option<&Location> {
        match self {
            IndexedValue::Location(location) => Some(location),
            IndexedValue::NextKeyword(_) => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&Keyword> {
        match self {
            IndexedValue::NextKeyword(keyword) => Some(keyword),
            IndexedValue::Location(_) => None,
        }
    }
}

impl From<Location> for IndexedValue {
    fn from(location: Location) -> Self {
        IndexedValue::Location(location)
    }
}

impl From<Keyword> for IndexedValue {
    fn from(keyword: Keyword) -> Self {
        IndexedValue::NextKeyword(keyword)
    }
}

impl fmt::Debug for IndexedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexedValue::Location(location) => write!(f, "IndexedValue::{:?}", location),
            IndexedValue::NextKeyword(keyword) => write!(f, "IndexedValue::{:?}", keyword),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        let location = IndexedValue::from(Location::from("db/42"));
        let bytes = location.to_vec();
        assert_eq!(bytes[0], b'l');
        assert_eq!(IndexedValue::from_bytes(&bytes).unwrap(), location);

        let keyword = IndexedValue::from(Keyword::from("rust"));
        let bytes = keyword.to_vec();
        assert_eq!(bytes[0], b'w');
        assert_eq!(IndexedValue::from_bytes(&bytes).unwrap(), keyword);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = IndexedValue::from_bytes(b"x123").unwrap_err();
        assert!(matches!(err, IndexError::InvalidIndexedValueTag(b'x')));
        assert!(matches!(
            IndexedValue::from_bytes(&[]).unwrap_err(),
            IndexError::TruncatedInput { .. }
        ));
    }

    #[test]
    fn empty_payloads_are_valid() {
        let value = IndexedValue::from_bytes(b"l").unwrap();
        assert!(value.is_location());
        assert!(value.as_location().unwrap().is_empty());
    }
}

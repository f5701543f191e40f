use std::borrow::Cow;

use emmi_common::{
    ChainValue, EntryValue, IndexResult, IndexedValue, Keyword, Location, Uid, UID_LENGTH,
};

/// A value that serializes as a self-describing record.
///
/// `FIXED_SIZE` records are written raw inside collections; everything else
/// carries a LEB128 length prefix.
pub trait WireRecord: Sized {
    const FIXED_SIZE: Option<usize> = None;

    fn to_wire(&self) -> Cow<'_, [u8]>;
    fn from_wire(bytes: &[u8]) -> IndexResult<Self>;
}

impl WireRecord for Uid {
    const FIXED_SIZE: Option<usize> = Some(UID_LENGTH);

    fn to_wire(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_ref())
    }

    fn from_wire(bytes: &[u8]) -> IndexResult<Self> {
        Uid::from_bytes(bytes)
    }
}

macro_rules! borrowed_record {
    ($name:ident) => {
        impl WireRecord for $name {
            fn to_wire(&self) -> Cow<'_, [u8]> {
                Cow::Borrowed(self.as_ref())
            }

            fn from_wire(bytes: &[u8]) -> IndexResult<Self> {
                Ok($name::from(bytes))
            }
        }
    };
}

borrowed_record!(EntryValue);
borrowed_record!(ChainValue);
borrowed_record!(Keyword);
borrowed_record!(Location);

impl WireRecord for IndexedValue {
    fn to_wire(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.to_vec())
    }

    fn from_wire(bytes: &[u8]) -> IndexResult<Self> {
        IndexedValue::from_bytes(bytes)
    }
}

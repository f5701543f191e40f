//! Shared record types and error taxonomy for the emmi storage adapter.
//!
//! Everything that crosses the callback boundary is ultimately a byte
//! array; the types here give those arrays identity (which table, which
//! role) without copying more than necessary.

mod error;
mod params;
mod uid;
mod value;

pub use error::{IndexError, IndexResult};
pub use params::SearchParams;
pub use uid::{Uid, UID_LENGTH};
pub use value::{ChainValue, EntryValue, IndexedValue, Keyword, Location, UpsertEntry};

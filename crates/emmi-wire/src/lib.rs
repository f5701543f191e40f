//! # Wire format
//!
//! The codec reproduces the externally-fixed binary framing the index
//! engine uses for every buffer that crosses the callback boundary.
//!
//! A variable-size record is a length-prefixed byte array:
//!
//! ┌─────────────────────────────┐
//! │ Record                      │
//! │┌ ─ ─ ─ ─ ─ ─ ┬ ─ ─ ─ ─ ─ ─ ┐│
//! │  LEB128 len  │    bytes     │
//! │└ ─ ─ ─ ─ ─ ─ ┴ ─ ─ ─ ─ ─ ─ ┘│
//! └─────────────────────────────┘
//!
//! A fixed-size record (a `Uid` inside a collection) is written raw, with
//! no prefix. A collection is a run of records closed by one zero-length
//! record, and a map interleaves keys and values without any wrapping
//! boundary:
//!
//! ┌──────────────────────────────────────────────────────────┐
//! │ List                                                     │
//! │┌ ─ ─ ─ ─ ┬ ─ ─ ─┌ ─ ─ ─ ─ ┬ ─ ─ ─ ─ ┐                    │
//! │  Record │  ...  │ Record  │  0x00                        │
//! │└ ─ ─ ─ ─ ┴ ─ ─ ─└ ─ ─ ─ ─ ┴ ─ ─ ─ ─ ┘                    │
//! ├──────────────────────────────────────────────────────────┤
//! │ Map                                                      │
//! │┌ ─ ─ ┬ ─ ─ ─ ┬ ─ ─ ─┌ ─ ─ ┬ ─ ─ ─ ─ ┬ ─ ─ ─ ┐            │
//! │  key │ value │  ...  │ key │  value  │ 0x00              │
//! │└ ─ ─ ┴ ─ ─ ─ ┴ ─ ─ ─└ ─ ─ ┴ ─ ─ ─ ─ ┴ ─ ─ ─ ┘            │
//! └──────────────────────────────────────────────────────────┘
//!
//! Because the terminator is a zero-length record, a variable-size map key
//! may never serialize to zero bytes. An empty list or map is exactly one
//! `0x00` byte, and an empty input buffer decodes as an empty collection.

mod de;
mod out_buf;
mod reader;
mod record;
mod ser;
pub mod varint;

pub use de::{deserialize_list, deserialize_map, RecordIter, RecordReader};
pub use out_buf::OutBuf;
pub use reader::PeekReader;
pub use record::WireRecord;
pub use ser::RecordWriter;

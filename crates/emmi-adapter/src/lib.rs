//! Storage callback adapter for an encrypted multi-map search index.
//!
//! The index engine persists two tables through the embedding application:
//! the Entry Table (one encrypted row per keyword, pointing at the head of
//! that keyword's chain) and the Chain Table (the encrypted linked nodes of
//! indexed values). The engine never talks to storage directly: it hands
//! the adapter a serialized request buffer and a caller-owned output
//! buffer, the adapter decodes the request with [`emmi_wire`], drives an
//! injected [`IndexBackend`], and encodes the response back.
//!
//! The adapter is synchronous and performs no retries or timeouts of its
//! own; all blocking lives inside the backend. The paginated full scan
//! keeps its position in an explicit [`EntryScan`] handle owned by the
//! caller, so one scan in flight per handle is enforced by `&mut`
//! borrowing rather than by convention.

mod adapter;
mod backend;
pub mod mem_backend;
mod scan;
pub mod status;

pub use adapter::CallbackAdapter;
pub use backend::IndexBackend;
pub use mem_backend::MemBackend;
pub use scan::{EntryScan, ScanStatus};

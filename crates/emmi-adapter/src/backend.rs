use rustc_hash::FxHashMap;

use emmi_common::{ChainValue, EntryValue, IndexResult, IndexedValue, Location, Uid, UpsertEntry};

/// The storage capability the embedding application injects.
///
/// Implementations own the actual table lifecycle; the adapter only moves
/// records across the boundary. Any failure should be reported as
/// [`IndexError::StorageUnavailable`](emmi_common::IndexError::StorageUnavailable)
/// (see [`IndexError::storage`](emmi_common::IndexError::storage)); the
/// adapter never retries.
pub trait IndexBackend {
    /// Entry Table rows for the given uids. Missing uids are simply absent
    /// from the result.
    fn fetch_entries(&self, uids: &[Uid]) -> IndexResult<FxHashMap<Uid, EntryValue>>;

    /// Chain Table rows for the given uids.
    fn fetch_chains(&self, uids: &[Uid]) -> IndexResult<FxHashMap<Uid, ChainValue>>;

    /// Snapshot of the whole Entry Table, in an order that stays stable for
    /// the duration of one scan.
    fn dump_entries(&self) -> IndexResult<Vec<(Uid, EntryValue)>>;

    /// Every Entry Table uid, without the values.
    fn dump_entry_uids(&self) -> IndexResult<Vec<Uid>>;

    /// Conditional writes: replace a row only if the stored value equals
    /// `previous` (an empty `previous` expects the row to be absent).
    /// Returns the rejected uids mapped to the value currently stored, so
    /// the engine can retry with a fresh `previous`.
    fn upsert_entries(
        &mut self,
        entries: FxHashMap<Uid, UpsertEntry>,
    ) -> IndexResult<FxHashMap<Uid, EntryValue>>;

    /// Unconditional writes of new chain nodes.
    fn insert_chains(&mut self, items: FxHashMap<Uid, ChainValue>) -> IndexResult<()>;

    /// Compaction step: delete `removed_chains` and write the rewritten
    /// rows as one atomic unit. Partial application must not be observable.
    fn update_lines(
        &mut self,
        removed_chains: Vec<Uid>,
        new_entries: FxHashMap<Uid, EntryValue>,
        new_chains: FxHashMap<Uid, ChainValue>,
    ) -> IndexResult<()>;

    /// Which of `candidates` no longer point at live application data.
    fn list_removed_locations(&self, candidates: Vec<Location>) -> IndexResult<Vec<Location>>;

    /// A batch of decrypted search results. Return `false` to stop the
    /// engine's traversal early.
    fn on_progress(&self, results: &[IndexedValue]) -> IndexResult<bool>;
}

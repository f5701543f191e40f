//! In-memory reference backend: the smallest faithful implementation of
//! the [`IndexBackend`] contract, used by the test suite and handy for
//! prototyping an embedding before real storage exists.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;

use emmi_common::{
    ChainValue, EntryValue, IndexError, IndexResult, IndexedValue, Location, Uid, UpsertEntry,
};

use crate::IndexBackend;

#[derive(Debug, Default)]
pub struct MemBackend {
    entries: BTreeMap<Uid, EntryValue>,
    chains: BTreeMap<Uid, ChainValue>,
    removed_locations: BTreeSet<Location>,
    /// Batches seen by `on_progress`, in arrival order.
    progress_batches: RefCell<Vec<Vec<IndexedValue>>>,
    /// `on_progress` answers `false` once this many batches have arrived.
    progress_limit: Option<usize>,
    /// When set, every operation fails with `StorageUnavailable`.
    unavailable: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        MemBackend::default()
    }

    pub fn insert_entry(&mut self, uid: Uid, value: EntryValue) {
        self.entries.insert(uid, value);
    }

    pub fn insert_chain(&mut self, uid: Uid, value: ChainValue) {
        self.chains.insert(uid, value);
    }

    pub fn entry(&self, uid: &Uid) -> Option<&EntryValue> {
        self.entries.get(uid)
    }

    pub fn chain(&self, uid: &Uid) -> Option<&ChainValue> {
        self.chains.get(uid)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Mark a location as no longer pointing at live application data.
    pub fn mark_removed(&mut self, location: Location) {
        self.removed_locations.insert(location);
    }

    pub fn stop_progress_after(&mut self, batches: usize) {
        self.progress_limit = Some(batches);
    }

    pub fn progress_batches(&self) -> Vec<Vec<IndexedValue>> {
        self.progress_batches.borrow().clone()
    }

    /// Make every subsequent operation fail, to exercise error paths.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    fn check_available(&self) -> IndexResult<()> {
        if self.unavailable.get() {
            Err(IndexError::storage("mem backend marked unavailable"))
        } else {
            Ok(())
        }
    }
}

impl IndexBackend for MemBackend {
    fn fetch_entries(&self, uids: &[Uid]) -> IndexResult<FxHashMap<Uid, EntryValue>> {
        self.check_available()?;
        Ok(uids
            .iter()
            .filter_map(|uid| self.entries.get(uid).map(|value| (*uid, value.clone())))
            .collect())
    }

    fn fetch_chains(&self, uids: &[Uid]) -> IndexResult<FxHashMap<Uid, ChainValue>> {
        self.check_available()?;
        Ok(uids
            .iter()
            .filter_map(|uid| self.chains.get(uid).map(|value| (*uid, value.clone())))
            .collect())
    }

    fn dump_entries(&self) -> IndexResult<Vec<(Uid, EntryValue)>> {
        self.check_available()?;
        // BTreeMap order keeps the scan stable
        Ok(self
            .entries
            .iter()
            .map(|(uid, value)| (*uid, value.clone()))
            .collect())
    }

    fn dump_entry_uids(&self) -> IndexResult<Vec<Uid>> {
        self.check_available()?;
        Ok(self.entries.keys().copied().collect())
    }

    fn upsert_entries(
        &mut self,
        entries: FxHashMap<Uid, UpsertEntry>,
    ) -> IndexResult<FxHashMap<Uid, EntryValue>> {
        self.check_available()?;
        let mut failed = FxHashMap::default();
        for (uid, upsert) in entries {
            match self.entries.get(&uid) {
                Some(current) => {
                    if *current == upsert.previous {
                        self.entries.insert(uid, upsert.new);
                    } else {
                        failed.insert(uid, current.clone());
                    }
                }
                None => {
                    if upsert.previous.is_empty() {
                        self.entries.insert(uid, upsert.new);
                    } else {
                        // the row the writer expected is gone
                        failed.insert(uid, EntryValue::default());
                    }
                }
            }
        }
        Ok(failed)
    }

    fn insert_chains(&mut self, items: FxHashMap<Uid, ChainValue>) -> IndexResult<()> {
        self.check_available()?;
        self.chains.extend(items);
        Ok(())
    }

    fn update_lines(
        &mut self,
        removed_chains: Vec<Uid>,
        new_entries: FxHashMap<Uid, EntryValue>,
        new_chains: FxHashMap<Uid, ChainValue>,
    ) -> IndexResult<()> {
        self.check_available()?;
        // single-threaded map mutations cannot be observed half-applied
        for uid in removed_chains {
            self.chains.remove(&uid);
        }
        self.entries.extend(new_entries);
        self.chains.extend(new_chains);
        Ok(())
    }

    fn list_removed_locations(&self, candidates: Vec<Location>) -> IndexResult<Vec<Location>> {
        self.check_available()?;
        Ok(candidates
            .into_iter()
            .filter(|location| self.removed_locations.contains(location))
            .collect())
    }

    fn on_progress(&self, results: &[IndexedValue]) -> IndexResult<bool> {
        self.check_available()?;
        let mut batches = self.progress_batches.borrow_mut();
        batches.push(results.to_vec());
        Ok(match self.progress_limit {
            Some(limit) => batches.len() < limit,
            None => true,
        })
    }
}

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use emmi_common::{
    ChainValue, EntryValue, IndexError, IndexResult, IndexedValue, Location, Uid, UpsertEntry,
};
use emmi_wire::{OutBuf, RecordReader, RecordWriter, WireRecord};

use crate::{status, EntryScan, IndexBackend, ScanStatus};

/// One adapter operation per distinguishable index-engine request.
///
/// Requests arrive as fully-formed binary buffers; responses are staged and
/// copied into the caller-owned output slice, whose declared capacity is
/// never exceeded. Decode failures abort the single call; backend failures
/// pass through untouched. Every error is also recorded for
/// [`status::last_error`] before it is returned.
#[derive(Debug)]
pub struct CallbackAdapter<B> {
    backend: B,
}

impl<B> CallbackAdapter<B> {
    pub fn new(backend: B) -> Self {
        CallbackAdapter { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

fn backend_failed(err: IndexError) -> IndexError {
    warn!(%err, "backend call failed");
    err
}

fn encode_entry_set<'a, K, V>(
    entries: impl IntoIterator<Item = (&'a K, &'a V)>,
    output: &mut [u8],
) -> IndexResult<usize>
where
    K: WireRecord + 'a,
    V: WireRecord + 'a,
{
    let mut writer = RecordWriter::new();
    writer.write_entries(entries)?;
    OutBuf::new(output).copy_from(&writer.into_bytes())
}

impl<B: IndexBackend> CallbackAdapter<B> {
    /// Entry Table lookup: request is a list of uids (an empty request asks
    /// for nothing), response is the found rows as an entry set.
    pub fn fetch_entries(&self, request: &[u8], output: &mut [u8]) -> IndexResult<usize> {
        let mut run = || {
            let uids: Vec<Uid> = RecordReader::new(request).read_list()?;
            let records = self.backend.fetch_entries(&uids).map_err(backend_failed)?;
            trace!(
                requested = uids.len(),
                found = records.len(),
                "fetch_entries"
            );
            encode_entry_set(records.iter(), output)
        };
        run().map_err(status::record)
    }

    /// Chain Table lookup; same shape as [`fetch_entries`](Self::fetch_entries).
    pub fn fetch_chains(&self, request: &[u8], output: &mut [u8]) -> IndexResult<usize> {
        let mut run = || {
            let uids: Vec<Uid> = RecordReader::new(request).read_list()?;
            let records = self.backend.fetch_chains(&uids).map_err(backend_failed)?;
            trace!(
                requested = uids.len(),
                found = records.len(),
                "fetch_chains"
            );
            encode_entry_set(records.iter(), output)
        };
        run().map_err(status::record)
    }

    /// One page of a paginated scan over the whole Entry Table.
    ///
    /// The first call on an idle `scan` snapshots the table through the
    /// backend; subsequent calls resume. Every non-empty page reports
    /// [`ScanStatus::HasMore`]; the terminal page writes zero bytes,
    /// reports [`ScanStatus::Done`] and resets the handle, so a fresh call
    /// afterwards begins a new scan. `max_results == 0` ends the scan
    /// immediately.
    pub fn fetch_all_entries(
        &self,
        scan: &mut EntryScan,
        max_results: usize,
        output: &mut [u8],
    ) -> IndexResult<(usize, ScanStatus)> {
        let mut run = || {
            scan.start_if_idle(|| self.backend.dump_entries().map_err(backend_failed))?;
            let (page, scan_status) = scan.next_page(max_results);
            trace!(rows = page.len(), ?scan_status, "fetch_all_entries");
            let written = if page.is_empty() {
                0
            } else {
                encode_entry_set(page.iter().map(|(uid, value)| (uid, value)), output)?
            };
            Ok((written, scan_status))
        };
        run().map_err(status::record)
    }

    /// Every Entry Table uid, as a list. Used by the engine to enumerate
    /// tokens before a compaction pass.
    pub fn dump_entry_uids(&self, output: &mut [u8]) -> IndexResult<usize> {
        let mut run = || {
            let uids = self.backend.dump_entry_uids().map_err(backend_failed)?;
            trace!(uids = uids.len(), "dump_entry_uids");
            let mut writer = RecordWriter::new();
            writer.write_list(uids.iter())?;
            OutBuf::new(output).copy_from(&writer.into_bytes())
        };
        run().map_err(status::record)
    }

    /// Conditional Entry Table writes. The request maps each uid to the
    /// expected current value and the replacement (wire layout per entry:
    /// uid, previous, new). The response maps each rejected uid to the
    /// value actually stored; a rejection is data, not an error.
    pub fn upsert_entries(&mut self, request: &[u8], output: &mut [u8]) -> IndexResult<usize> {
        let mut run = |adapter: &mut Self| {
            let mut reader = RecordReader::new(request);
            let mut entries = FxHashMap::default();
            while !reader.at_collection_end::<Uid>() {
                let uid: Uid = reader.read_record()?;
                let (previous, new) = reader.read_pair()?;
                entries.insert(uid, UpsertEntry { previous, new });
            }
            let requested = entries.len();
            let failed = adapter
                .backend
                .upsert_entries(entries)
                .map_err(backend_failed)?;
            trace!(requested, rejected = failed.len(), "upsert_entries");
            encode_entry_set(failed.iter(), output)
        };
        run(self).map_err(status::record)
    }

    /// Unconditional Chain Table writes; the request is a uid→value map.
    pub fn insert_chains(&mut self, request: &[u8]) -> IndexResult<()> {
        let run = |adapter: &mut Self| {
            let items: FxHashMap<Uid, ChainValue> = RecordReader::new(request).read_map()?;
            trace!(items = items.len(), "insert_chains");
            adapter.backend.insert_chains(items).map_err(backend_failed)
        };
        run(self).map_err(status::record)
    }

    /// Atomic compaction step: `removed_chains` is a uid list, the other
    /// two are uid→value maps. The backend applies all three as one unit.
    pub fn update_lines(
        &mut self,
        removed_chains: &[u8],
        new_entries: &[u8],
        new_chains: &[u8],
    ) -> IndexResult<()> {
        let run = |adapter: &mut Self| {
            let removed: Vec<Uid> = RecordReader::new(removed_chains).read_list()?;
            let entries: FxHashMap<Uid, EntryValue> = RecordReader::new(new_entries).read_map()?;
            let chains: FxHashMap<Uid, ChainValue> = RecordReader::new(new_chains).read_map()?;
            trace!(
                removed = removed.len(),
                new_entries = entries.len(),
                new_chains = chains.len(),
                "update_lines"
            );
            adapter
                .backend
                .update_lines(removed, entries, chains)
                .map_err(backend_failed)
        };
        run(self).map_err(status::record)
    }

    /// Which of the candidate locations no longer point at live data. An
    /// empty subset writes zero bytes, the normal "none removed" outcome.
    pub fn list_removed_locations(&self, request: &[u8], output: &mut [u8]) -> IndexResult<usize> {
        let mut run = || {
            let candidates: Vec<Location> = RecordReader::new(request).read_list()?;
            let candidate_count = candidates.len();
            let removed = self
                .backend
                .list_removed_locations(candidates)
                .map_err(backend_failed)?;
            trace!(
                candidates = candidate_count,
                removed = removed.len(),
                "list_removed_locations"
            );
            if removed.is_empty() {
                return Ok(0);
            }
            let mut writer = RecordWriter::new();
            writer.write_list(removed.iter())?;
            OutBuf::new(output).copy_from(&writer.into_bytes())
        };
        run().map_err(status::record)
    }

    /// A batch of decrypted search results, decoded and forwarded. The
    /// returned boolean is the engine's only mid-call abort channel:
    /// `false` stops further traversal.
    pub fn progress(&self, request: &[u8]) -> IndexResult<bool> {
        let run = || {
            let results: Vec<IndexedValue> = RecordReader::new(request).read_list()?;
            trace!(results = results.len(), "progress");
            self.backend.on_progress(&results).map_err(backend_failed)
        };
        run().map_err(status::record)
    }
}

use bytes::Bytes;
use rustc_hash::FxHashSet;

use crate::Keyword;

/// Options recognized by the engine for a search call.
///
/// The adapter never interprets these; they travel with the request so the
/// embedding application configures one search in one place.
#[derive(Clone, Debug)]
pub struct SearchParams {
    /// Namespace tag mixed into every Entry Table lookup.
    pub label: Bytes,
    /// Keywords to search; deduplicated, order-irrelevant.
    pub keywords: FxHashSet<Keyword>,
    /// Per-keyword cap on returned results. 0 means unbounded.
    pub max_results_per_keyword: usize,
    /// Graph traversal depth bound. -1 lets the engine choose.
    pub max_depth: i32,
    /// Batch size of chain fetches. 0 means the engine default. Larger
    /// batches leak more of the access pattern in exchange for throughput.
    pub insecure_fetch_chains_batch_size: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            label: Bytes::new(),
            keywords: FxHashSet::default(),
            max_results_per_keyword: 0,
            max_depth: -1,
            insecure_fetch_chains_batch_size: 0,
        }
    }
}

impl SearchParams {
    pub fn new(label: impl Into<Bytes>) -> Self {
        SearchParams {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = Keyword>) -> Self {
        self.keywords.extend(keywords);
        self
    }

    pub fn with_max_results_per_keyword(mut self, max: usize) -> Self {
        self.max_results_per_keyword = max;
        self
    }

    pub fn with_max_depth(mut self, depth: i32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_insecure_fetch_chains_batch_size(mut self, size: usize) -> Self {
        self.insecure_fetch_chains_batch_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_deduplicate() {
        let params = SearchParams::new(&b"tenant-1"[..])
            .with_keywords([Keyword::from("a"), Keyword::from("b"), Keyword::from("a")]);
        assert_eq!(params.keywords.len(), 2);
        assert_eq!(params.max_depth, -1);
    }
}

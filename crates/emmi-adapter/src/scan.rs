use emmi_common::{EntryValue, Uid};

/// Status of a paginated full scan, also its integer wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ScanStatus {
    /// The scan is complete; the handle is reset and the next call starts
    /// a fresh scan.
    Done = 0,
    /// More rows remain; call again with the same handle.
    HasMore = 1,
}

impl ScanStatus {
    pub fn as_code(self) -> i32 {
        self as i32
    }
}

/// Position of one full Entry Table scan.
///
/// The handle is owned by the caller and passed by `&mut` into every
/// [`fetch_all_entries`](crate::CallbackAdapter::fetch_all_entries) call of
/// the same logical scan. Interleaving two scans requires two handles;
/// feeding one handle to both corrupts neither memory nor the table, but
/// the pages of the two scans become a single arbitrary interleaving.
///
/// A scan returns `HasMore` with every non-empty page and `Done` exactly
/// once, with zero rows; `Done` resets the handle so the next call starts
/// over from the beginning.
#[derive(Debug, Default)]
pub struct EntryScan {
    rows: Option<std::vec::IntoIter<(Uid, EntryValue)>>,
}

impl EntryScan {
    pub fn new() -> Self {
        EntryScan::default()
    }

    /// True between the first page of a scan and its terminal `Done` page.
    pub fn is_active(&self) -> bool {
        self.rows.is_some()
    }

    pub(crate) fn start_if_idle<E>(
        &mut self,
        snapshot: impl FnOnce() -> Result<Vec<(Uid, EntryValue)>, E>,
    ) -> Result<(), E> {
        if self.rows.is_none() {
            self.rows = Some(snapshot()?.into_iter());
        }
        Ok(())
    }

    pub(crate) fn next_page(&mut self, max_results: usize) -> (Vec<(Uid, EntryValue)>, ScanStatus) {
        let page: Vec<_> = match self.rows.as_mut() {
            Some(rows) => rows.by_ref().take(max_results).collect(),
            None => Vec::new(),
        };
        if page.is_empty() {
            self.rows = None;
            (page, ScanStatus::Done)
        } else {
            (page, ScanStatus::HasMore)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(seed: u8) -> (Uid, EntryValue) {
        (Uid::from([seed; 32]), EntryValue::from(vec![seed]))
    }

    #[test]
    fn non_empty_pages_then_one_empty_terminal_page() {
        let mut scan = EntryScan::new();
        scan.start_if_idle::<()>(|| Ok(vec![row(1), row(2), row(3)]))
            .unwrap();
        assert!(scan.is_active());

        let (page, status) = scan.next_page(2);
        assert_eq!(page.len(), 2);
        assert_eq!(status, ScanStatus::HasMore);

        let (page, status) = scan.next_page(2);
        assert_eq!(page.len(), 1);
        assert_eq!(status, ScanStatus::HasMore);

        let (page, status) = scan.next_page(2);
        assert!(page.is_empty());
        assert_eq!(status, ScanStatus::Done);
        assert!(!scan.is_active());
    }

    #[test]
    fn exact_multiple_still_ends_with_empty_terminal_page() {
        let mut scan = EntryScan::new();
        scan.start_if_idle::<()>(|| Ok(vec![row(1), row(2)])).unwrap();
        assert_eq!(scan.next_page(2).1, ScanStatus::HasMore);
        let (page, status) = scan.next_page(2);
        assert!(page.is_empty());
        assert_eq!(status, ScanStatus::Done);
    }
}

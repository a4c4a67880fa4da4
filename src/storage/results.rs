use crate::state::PageRecord;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// URL to page record, written once per completed fetch
#[derive(Debug, Default)]
pub struct ResultTable {
    pages: Mutex<HashMap<String, PageRecord>>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the record for `url`
    ///
    /// A second record for the same URL means dedup was bypassed; the first
    /// record wins and the second is dropped with a warning. Returns whether
    /// the record was stored.
    pub fn insert(&self, url: String, record: PageRecord) -> bool {
        let mut pages = self.pages.lock().unwrap_or_else(PoisonError::into_inner);
        if pages.contains_key(&url) {
            tracing::warn!("Page record for {} already exists; keeping the first", url);
            return false;
        }
        pages.insert(url, record);
        true
    }

    pub fn len(&self) -> usize {
        let pages = self.pages.lock().unwrap_or_else(PoisonError::into_inner);
        pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves every record out, leaving the table empty
    ///
    /// Only meaningful once all writers have finished.
    pub fn take_pages(&self) -> HashMap<String, PageRecord> {
        let mut pages = self.pages.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pages)
    }
}

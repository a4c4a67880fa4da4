use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// The set of URLs that already have (or had) a task
///
/// Membership is claimed before a task is spawned, so two racing discoverers
/// of the same URL can never both schedule it.
#[derive(Debug, Default)]
pub struct DispatchedSet {
    urls: Mutex<HashSet<String>>,
}

impl DispatchedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for dispatch
    ///
    /// Returns true if the caller now owns the URL and must schedule it, false
    /// if it was already claimed. The check and the insert are one critical
    /// section.
    pub fn insert_if_absent(&self, url: &str) -> bool {
        let mut urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        urls.insert(url.to_string())
    }

    /// Gives up a claim so the URL can be rediscovered
    pub fn release(&self, url: &str) -> bool {
        let mut urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        urls.remove(url)
    }

    #[cfg(test)]
    pub fn contains(&self, url: &str) -> bool {
        let urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        urls.contains(url)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        let urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        urls.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

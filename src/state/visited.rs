use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};
use url::Url;

/// Normalized page addresses already dispatched to a worker
///
/// Shared between the coordinator and the link-dispatch tasks. Membership
/// checks take the read lock; [`VisitedSet::insert`] is the single
/// check-and-insert primitive and takes the write lock. The set only grows.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: RwLock<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `url` has already been dispatched
    pub fn contains(&self, url: &Url) -> bool {
        self.urls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url.as_str())
    }

    /// Marks `url` as dispatched
    ///
    /// Returns true if it was not yet in the set, i.e. the caller now owns
    /// dispatching it.
    pub fn insert(&self, url: &Url) -> bool {
        self.urls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.as_str().to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Outstanding-unit counter used to detect the end of a crawl
///
/// One unit is outstanding for every dispatched address whose resulting links
/// have not all been examined yet. The crawl is over exactly when the count
/// drops to zero. Callers must [`add`](Frontier::add) a page's link units
/// before they [`retire`](Frontier::retire) the page's own unit, otherwise the
/// count can read zero while links are still waiting to be examined.
#[derive(Debug, Default)]
pub struct Frontier {
    outstanding: AtomicUsize,
    drained: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `count` new outstanding units
    pub fn add(&self, count: usize) {
        if count > 0 {
            self.outstanding.fetch_add(count, Ordering::SeqCst);
        }
    }

    /// Resolves one outstanding unit
    ///
    /// Returns true if this was the last one.
    pub fn retire(&self) -> bool {
        let previous = self
            .outstanding
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));

        match previous {
            Ok(1) => {
                self.drained.notify_one();
                true
            }
            Ok(_) => false,
            Err(_) => {
                tracing::warn!("Retired a unit on an already drained frontier");
                false
            }
        }
    }

    /// Current number of outstanding units
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    pub fn is_drained(&self) -> bool {
        self.outstanding() == 0
    }

    /// Waits until the outstanding count reaches zero
    pub async fn drained(&self) {
        while !self.is_drained() {
            // A notification raised between the check and this await is kept
            // as a permit, so it cannot be missed.
            self.drained.notified().await;
        }
    }
}

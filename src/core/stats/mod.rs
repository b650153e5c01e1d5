use serde::{Deserialize, Serialize};

/// Running totals for a queue, updated under the queue lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub inserted: u64,
    pub removed: u64,
    pub evicted: u64, // inserts that overwrote the oldest element
    pub timeouts: u64,
}

impl QueueStats {
    pub(crate) fn record_insert(&mut self, evicted: bool) {
        self.inserted += 1;
        if evicted {
            self.evicted += 1;
        }
    }

    pub(crate) fn record_remove(&mut self) {
        self.removed += 1;
    }

    pub(crate) fn record_timeout(&mut self) {
        self.timeouts += 1;
    }

    /// Items inserted but neither removed nor evicted.
    ///
    /// Always equals the live count of the queue these totals came from.
    pub fn retained(&self) -> u64 {
        self.inserted - self.removed - self.evicted
    }
}

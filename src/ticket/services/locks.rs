//! Per-uid serialisation of lifecycle mutations.

use crate::ticket::domain::Uid;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Async mutexes keyed by ticket uid.
///
/// Holding the guard for a uid excludes every other submit or update on
/// tickets filed under the same uid. Slots nobody holds are pruned on the
/// next acquisition.
#[derive(Debug, Default)]
pub(crate) struct UidLocks {
    slots: Mutex<HashMap<Uid, Arc<AsyncMutex<()>>>>,
}

impl UidLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `uid`.
    pub(crate) async fn lock(&self, uid: &Uid) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(uid.clone()).or_default())
        };
        slot.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<AsyncMutex<()>>>;

/// Per-subject async locks serializing read-decide-write sequences
///
/// An entry lives only while some caller holds or waits on it.
#[derive(Debug, Default)]
pub(crate) struct SubjectLocks {
    locks: Mutex<LockMap>,
}

impl SubjectLocks {
    /// Waits for exclusive access to `subject`; other subjects proceed freely
    pub(crate) async fn acquire(&self, subject: &str) -> SubjectGuard<'_> {
        let lock = self
            .map()
            .entry(subject.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone();

        SubjectGuard {
            guard: Some(lock.lock_owned().await),
            locks: self,
            subject: subject.to_string(),
        }
    }

    fn map(&self) -> MutexGuard<'_, LockMap> {
        self.locks.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.map().len()
    }
}

/// Exclusive access to one subject; releasing the last user drops its entry
pub(crate) struct SubjectGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a SubjectLocks,
    subject: String,
}

impl Drop for SubjectGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();

        // Clones are only taken under the map lock, so a count of one means
        // nobody else holds or waits on this entry
        let mut map = self.locks.map();
        if map
            .get(&self.subject)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&self.subject);
        }
    }
}

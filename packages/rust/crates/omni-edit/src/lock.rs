//! Path-keyed write serialization.
//!
//! A read-modify-write of one file holds that file's lock for its whole
//! duration, so two concurrent instructions targeting the same file cannot
//! interleave. Registry entries live only while some caller holds or waits
//! on them.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use once_cell::sync::Lazy;

static WRITE_LOCKS: Lazy<DashMap<PathBuf, Arc<Mutex<()>>>> = Lazy::new(DashMap::new);

fn lock_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Run `f` while holding the process-wide lock for `path`.
///
/// The lock is keyed by the canonical path when it exists. Its registry
/// entry is dropped once no other caller shares it.
pub fn with_path_lock<T>(path: &Path, f: impl FnOnce() -> T) -> T {
    let key = lock_key(path);
    let lock = Arc::clone(&WRITE_LOCKS.entry(key.clone()).or_default());

    let result = {
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    };

    drop(lock);
    // Entry lookups clone the Arc under the shard lock, so a count of one
    // means nobody else holds or waits on it.
    WRITE_LOCKS.remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
    result
}

#[cfg(test)]
fn is_registered(path: &Path) -> bool {
    WRITE_LOCKS.contains_key(&lock_key(path))
}

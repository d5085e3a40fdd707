//! Registry of cancellable deferred-removal timers.
//!
//! Each announced ticket gets a one-shot timer that hides it from the
//! accepted column after the configured delay. Timers are keyed by ticket
//! identifier: scheduling again for the same ticket replaces the pending
//! timer, `cancel` handles re-arrivals, and dropping the registry aborts
//! everything outstanding so nothing mutates display state after the board
//! is torn down.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

struct TimerEntry {
    generation: u64,
    handle: JoinHandle<()>,
}

type TimerMap = HashMap<String, TimerEntry>;

pub struct TimerRegistry {
    inner: Arc<Mutex<TimerMap>>,
    generation: AtomicU64,
}

fn lock(map: &Mutex<TimerMap>) -> std::sync::MutexGuard<'_, TimerMap> {
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Remove the entry for `key` only if it still belongs to `generation`.
/// A task whose slot was taken by a reschedule gets `false` and must not
/// fire; the replacement entry stays in place.
fn claim(map: &Mutex<TimerMap>, key: &str, generation: u64) -> bool {
    let mut map = lock(map);
    match map.get(key) {
        Some(entry) if entry.generation == generation => {
            map.remove(key);
            true
        }
        _ => false,
    }
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Schedule `on_fire` to run after `delay`, keyed by ticket id.
    /// A pending timer for the same id is aborted and replaced. Each timer
    /// carries a generation number checked again at fire time, so a task
    /// that had already finished sleeping when its replacement arrived can
    /// neither fire nor evict the replacement's entry.
    pub fn schedule(&self, id: String, delay: Duration, on_fire: impl FnOnce() + Send + 'static) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let mut map = lock(&self.inner);
        if let Some(previous) = map.remove(&id) {
            previous.handle.abort();
        }
        let inner = Arc::clone(&self.inner);
        let key = id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if claim(&inner, &key, generation) {
                on_fire();
            }
        });
        map.insert(id, TimerEntry { generation, handle });
    }

    /// Abort the pending timer for a ticket, if any. Returns whether a
    /// timer was actually cancelled.
    pub fn cancel(&self, id: &str) -> bool {
        match lock(&self.inner).remove(id) {
            Some(entry) => {
                entry.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Abort every pending timer.
    pub fn cancel_all(&self) {
        let mut map = lock(&self.inner);
        for (_, entry) in map.drain() {
            entry.handle.abort();
        }
    }

    /// Number of timers still pending.
    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let registry = TimerRegistry::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        registry.schedule("a".to_string(), Duration::from_secs(15), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(registry.len(), 1);

        tokio::time::sleep(Duration::from_secs(14)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_pending_timer() {
        let registry = TimerRegistry::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        registry.schedule("a".to_string(), Duration::from_secs(15), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_secs(10)).await;

        // re-arrival restarts the window; the first timer must not fire
        let counter = Arc::clone(&fired);
        registry.schedule("a".to_string(), Duration::from_secs(15), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire() {
        let registry = TimerRegistry::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        registry.schedule("a".to_string(), Duration::from_secs(15), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(registry.cancel("a"));
        assert!(!registry.cancel("a"));

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_task_cannot_claim_replacement() {
        let registry = TimerRegistry::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        registry.schedule("a".to_string(), Duration::from_secs(15), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&fired);
        registry.schedule("a".to_string(), Duration::from_secs(15), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // A task from the replaced timer that outlived its abort must not
        // claim the slot or evict the replacement's entry
        assert!(!claim(&registry.inner, "a", 1));
        assert_eq!(registry.len(), 1);

        // The live timer still owns the slot
        assert!(claim(&registry.inner, "a", 2));
        assert!(registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_outstanding_timers() {
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let registry = TimerRegistry::new();
            let counter = Arc::clone(&fired);
            registry.schedule("a".to_string(), Duration::from_secs(15), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-key async locks so only one task rebuilds a missing entry.
///
/// Callers re-check the cache after acquiring: whoever waited behind the
/// rebuilder finds the fresh value and skips its own rebuild.
#[derive(Debug, Clone, Default)]
pub struct SingleFlight {
    flights: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> FlightGuard {
        let lock = self
            .flights
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;
        FlightGuard {
            key: key.to_string(),
            flights: Arc::clone(&self.flights),
            guard: Some(guard),
        }
    }

    /// Keys with a holder or waiter right now.
    pub fn in_flight(&self) -> usize {
        self.flights.len()
    }
}

/// Held while rebuilding; the map slot is dropped with the last holder.
pub struct FlightGuard {
    key: String,
    flights: Arc<DashMap<String, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl FlightGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        // Release the mutex first so its Arc no longer counts this guard
        self.guard.take();
        self.flights
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

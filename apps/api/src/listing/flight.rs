//! In-flight marks for records waiting on the scorer.
//!
//! The set lives behind a std mutex shared between the board and every
//! outstanding `FlightGuard`, so dropping a guard clears its mark even when the
//! screening future is dropped mid-await and the board lock is not available.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<Mutex<BTreeSet<String>>>);

impl InFlight {
    // A poisoned lock only means a holder panicked; the set is still usable.
    fn ids_mut(&self) -> MutexGuard<'_, BTreeSet<String>> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids_mut().contains(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids_mut().iter().cloned().collect()
    }

    /// Marks `id` in flight until the returned guard is dropped.
    /// `None` if it already was.
    pub fn begin(&self, id: &str) -> Option<FlightGuard> {
        if !self.ids_mut().insert(id.to_string()) {
            return None;
        }
        Some(FlightGuard {
            id: id.to_string(),
            in_flight: self.clone(),
        })
    }

    pub fn clear(&self, id: &str) {
        self.ids_mut().remove(id);
    }
}

/// Holds one in-flight mark.
#[derive(Debug)]
pub struct FlightGuard {
    id: String,
    in_flight: InFlight,
}

impl FlightGuard {
    #[cfg(test)]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.in_flight.clear(&self.id);
    }
}

//! First-occurrence timestamps for named probe events.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};

use crate::config::TIMESTAMP_FORMAT;

/// Records the first time each named probe event was seen.
///
/// Every read and write goes through a single mutex, so concurrent first
/// occurrences of the same name store exactly one value and a snapshot never
/// observes a partial write.
#[derive(Debug, Default)]
pub struct ProbeClock {
    first_seen: Mutex<HashMap<String, DateTime<Local>>>,
}

impl ProbeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` at the current time unless it already has a timestamp.
    ///
    /// Returns `true` only for the call that stored the value.
    pub fn record_first_occurrence(&self, name: &str) -> bool {
        self.record_at(name, Local::now())
    }

    fn record_at(&self, name: &str, at: DateTime<Local>) -> bool {
        let mut first_seen = self.lock();
        if first_seen.contains_key(name) {
            return false;
        }
        first_seen.insert(name.to_string(), at);
        tracing::info!(probe = %name, at = %at.format(TIMESTAMP_FORMAT), "First probe occurrence recorded");
        true
    }

    /// Timestamp recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<DateTime<Local>> {
        self.lock().get(name).copied()
    }

    /// Copy of every recorded timestamp, formatted as `YYYY-MM-DDTHH:MM:SS`.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock()
            .iter()
            .map(|(name, at)| (name.clone(), at.format(TIMESTAMP_FORMAT).to_string()))
            .collect()
    }

    // A panic while holding the lock cannot leave the map half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, DateTime<Local>>> {
        self.first_seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

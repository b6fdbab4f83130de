use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::store::{StoreError, WaitlistStore};
use crate::config::AdmissionConfig;

/// Aggregate waitlist statistics for the public stats endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitlistStats {
    pub total_signups: u64,
    pub recent_signups_24h: u64,
    pub capacity: u32,
    /// `round(total / capacity * 100)`; can exceed 100 because capacity is
    /// only softly enforced under concurrent admission.
    pub percentage_full: u32,
    pub last_updated: DateTime<Utc>,
}

/// Read-only stats derivation. Every call re-queries the store; the counts
/// are cheap and caching would only let the numbers drift.
pub struct StatsReporter<S> {
    store: Arc<S>,
    capacity: u32,
}

impl<S> StatsReporter<S>
where
    S: WaitlistStore + 'static,
{
    pub fn new(store: Arc<S>, config: AdmissionConfig) -> Self {
        Self {
            store,
            capacity: config.max_waitlist_entries,
        }
    }

    pub fn waitlist_stats(&self) -> Result<WaitlistStats, StoreError> {
        let now = Utc::now();
        let total_signups = self.store.count()?;
        let recent_signups_24h = self.store.count_joined_since(now - Duration::hours(24))?;

        let percentage_full = if self.capacity == 0 {
            100
        } else {
            ((total_signups as f64 / f64::from(self.capacity)) * 100.0).round() as u32
        };

        Ok(WaitlistStats {
            total_signups,
            recent_signups_24h,
            capacity: self.capacity,
            percentage_full,
            last_updated: now,
        })
    }
}

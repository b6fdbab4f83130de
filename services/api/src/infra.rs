use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use earlybird::signup::{
    ContactEntry, ContactStore, NewContactEntry, NewWaitlistEntry, StoreError, WaitlistEntry,
    WaitlistStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mutex-guarded waitlist storage for the single-process deployment. The
/// email scan under the lock plays the role of the database unique index:
/// check and insert happen atomically with respect to other requests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryWaitlist {
    entries: Arc<Mutex<Vec<WaitlistEntry>>>,
}

impl WaitlistStore for InMemoryWaitlist {
    fn insert(&self, entry: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError> {
        let mut guard = self.entries.lock().expect("waitlist mutex poisoned");
        if guard.iter().any(|existing| existing.email == entry.email) {
            return Err(StoreError::EmailTaken);
        }
        let stored = WaitlistEntry {
            name: entry.name,
            email: entry.email,
            ip_address: entry.ip_address,
            user_agent: entry.user_agent,
            position: entry.position,
            status: entry.status,
            joined_at: Utc::now(),
        };
        guard.push(stored.clone());
        Ok(stored)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let guard = self.entries.lock().expect("waitlist mutex poisoned");
        Ok(guard.len() as u64)
    }

    fn count_from_ip_since(&self, ip: &str, since: DateTime<Utc>) -> Result<u64, StoreError> {
        let guard = self.entries.lock().expect("waitlist mutex poisoned");
        Ok(guard
            .iter()
            .filter(|entry| entry.ip_address == ip && entry.joined_at >= since)
            .count() as u64)
    }

    fn count_joined_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError> {
        let guard = self.entries.lock().expect("waitlist mutex poisoned");
        Ok(guard.iter().filter(|entry| entry.joined_at >= since).count() as u64)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<WaitlistEntry>, StoreError> {
        let guard = self.entries.lock().expect("waitlist mutex poisoned");
        Ok(guard.iter().find(|entry| entry.email == email).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryContacts {
    entries: Arc<Mutex<Vec<ContactEntry>>>,
}

impl ContactStore for InMemoryContacts {
    fn insert(&self, entry: NewContactEntry) -> Result<ContactEntry, StoreError> {
        let stored = ContactEntry {
            name: entry.name,
            email: entry.email,
            subject: entry.subject,
            message: entry.message,
            ip_address: entry.ip_address,
            user_agent: entry.user_agent,
            created_at: Utc::now(),
        };
        let mut guard = self.entries.lock().expect("contact mutex poisoned");
        guard.push(stored.clone());
        Ok(stored)
    }

    fn count_from_ip_since(&self, ip: &str, since: DateTime<Utc>) -> Result<u64, StoreError> {
        let guard = self.entries.lock().expect("contact mutex poisoned");
        Ok(guard
            .iter()
            .filter(|entry| entry.ip_address == ip && entry.created_at >= since)
            .count() as u64)
    }
}

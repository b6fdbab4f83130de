use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::AdmissionConfig;
use crate::signup::domain::{
    ContactEntry, ContactRequest, NewContactEntry, NewWaitlistEntry, SignupRequest, WaitlistEntry,
};
use crate::signup::router::SignupState;
use crate::signup::service::{ContactAdmission, WaitlistAdmission};
use crate::signup::stats::StatsReporter;
use crate::signup::store::{ContactStore, StoreError, WaitlistStore};

#[derive(Default)]
pub(super) struct MemoryWaitlist {
    entries: Mutex<Vec<WaitlistEntry>>,
}

impl MemoryWaitlist {
    pub(super) fn entries(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().expect("waitlist mutex poisoned").clone()
    }
}

impl WaitlistStore for MemoryWaitlist {
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
        Ok(self.entries.lock().expect("waitlist mutex poisoned").len() as u64)
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

#[derive(Default)]
pub(super) struct MemoryContacts {
    entries: Mutex<Vec<ContactEntry>>,
}

impl MemoryContacts {
    pub(super) fn entries(&self) -> Vec<ContactEntry> {
        self.entries.lock().expect("contact mutex poisoned").clone()
    }
}

impl ContactStore for MemoryContacts {
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

/// Waitlist store whose pre-checks see no duplicate but whose insert loses
/// the race to the unique index.
pub(super) struct RacingWaitlist;

impl WaitlistStore for RacingWaitlist {
    fn insert(&self, _entry: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError> {
        Err(StoreError::EmailTaken)
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(0)
    }

    fn count_from_ip_since(&self, _ip: &str, _since: DateTime<Utc>) -> Result<u64, StoreError> {
        Ok(0)
    }

    fn count_joined_since(&self, _since: DateTime<Utc>) -> Result<u64, StoreError> {
        Ok(0)
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<WaitlistEntry>, StoreError> {
        Ok(None)
    }
}

/// Waitlist store that fails every round-trip.
pub(super) struct UnavailableWaitlist;

impl WaitlistStore for UnavailableWaitlist {
    fn insert(&self, _entry: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError> {
        Err(StoreError::Unavailable("down".to_string()))
    }

    fn count(&self) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("down".to_string()))
    }

    fn count_from_ip_since(&self, _ip: &str, _since: DateTime<Utc>) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("down".to_string()))
    }

    fn count_joined_since(&self, _since: DateTime<Utc>) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("down".to_string()))
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<WaitlistEntry>, StoreError> {
        Err(StoreError::Unavailable("down".to_string()))
    }
}

pub(super) fn admission_config() -> AdmissionConfig {
    AdmissionConfig::default()
}

pub(super) fn small_config(capacity: u32, signups_per_ip: u32) -> AdmissionConfig {
    AdmissionConfig {
        max_waitlist_entries: capacity,
        max_signups_per_ip_per_24h: signups_per_ip,
        ..AdmissionConfig::default()
    }
}

pub(super) fn signup(name: &str, email: &str, ip: &str) -> SignupRequest {
    SignupRequest {
        name: name.to_string(),
        email: email.to_string(),
        ip_address: ip.to_string(),
        user_agent: "test-agent".to_string(),
    }
}

pub(super) fn contact(name: &str, email: &str, ip: &str) -> ContactRequest {
    ContactRequest {
        name: name.to_string(),
        email: email.to_string(),
        subject: "Launch questions".to_string(),
        message: "When does the beta open for my region?".to_string(),
        ip_address: ip.to_string(),
        user_agent: "test-agent".to_string(),
    }
}

pub(super) fn memory_state(
    config: AdmissionConfig,
) -> (
    SignupState<MemoryWaitlist, MemoryContacts>,
    Arc<MemoryWaitlist>,
    Arc<MemoryContacts>,
) {
    let waitlist_store = Arc::new(MemoryWaitlist::default());
    let contact_store = Arc::new(MemoryContacts::default());
    let state = SignupState {
        waitlist: Arc::new(WaitlistAdmission::new(waitlist_store.clone(), config)),
        contact: Arc::new(ContactAdmission::new(contact_store.clone(), config)),
        stats: Arc::new(StatsReporter::new(waitlist_store.clone(), config)),
    };
    (state, waitlist_store, contact_store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

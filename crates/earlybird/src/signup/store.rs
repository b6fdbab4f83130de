use chrono::{DateTime, Utc};

use super::domain::{ContactEntry, NewContactEntry, NewWaitlistEntry, WaitlistEntry};

/// Durable waitlist storage consumed by the admission core. The store is the
/// only shared mutable resource: capacity and rate-limit state are always
/// re-derived from these queries, never cached in-process.
pub trait WaitlistStore: Send + Sync {
    /// Persist a new entry and return the stored record. Must fail with
    /// [`StoreError::EmailTaken`] when the unique index on the normalized
    /// email rejects the row; this is the real de-duplication enforcement
    /// point under concurrent admission.
    fn insert(&self, entry: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError>;

    /// Total number of entries currently stored.
    fn count(&self) -> Result<u64, StoreError>;

    /// Entries originating from `ip` with `joined_at >= since`.
    fn count_from_ip_since(&self, ip: &str, since: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Entries with `joined_at >= since`, regardless of origin.
    fn count_joined_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Look up an entry by its normalized email.
    fn find_by_email(&self, email: &str) -> Result<Option<WaitlistEntry>, StoreError>;
}

/// Durable contact-form storage. No uniqueness constraint applies.
pub trait ContactStore: Send + Sync {
    fn insert(&self, entry: NewContactEntry) -> Result<ContactEntry, StoreError>;

    /// Contact entries originating from `ip` with `created_at >= since`.
    fn count_from_ip_since(&self, ip: &str, since: DateTime<Utc>) -> Result<u64, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already present in the waitlist")]
    EmailTaken,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

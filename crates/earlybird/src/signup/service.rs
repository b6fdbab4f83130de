use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::domain::{
    AdmittedSignup, ContactEntry, ContactRequest, NewContactEntry, NewWaitlistEntry,
    SignupRequest, WaitlistStatus,
};
use super::store::{ContactStore, StoreError, WaitlistStore};
use super::validation::{normalize_email, normalize_message, normalize_name, normalize_subject};
use crate::config::AdmissionConfig;

/// Business rejection raised by the admission pipelines. Every variant is
/// deterministic for a given input and store state, and recoverable by
/// resubmission; none triggers an automatic retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("name must be 2-50 letters, spaces, hyphens, apostrophes, or periods")]
    InvalidName,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("subject must be 3-100 characters")]
    InvalidSubject,
    #[error("message must be 10-1000 characters")]
    InvalidMessage,
    #[error("the waitlist is at capacity")]
    WaitlistFull,
    #[error("this email is already on the waitlist")]
    DuplicateEmail,
    #[error("too many submissions from this address; try again later")]
    IpRateLimited,
}

impl Rejection {
    /// Stable machine-readable code for the presentation layer.
    pub const fn code(self) -> &'static str {
        match self {
            Rejection::InvalidName => "invalid_name",
            Rejection::InvalidEmail => "invalid_email",
            Rejection::InvalidSubject => "invalid_subject",
            Rejection::InvalidMessage => "invalid_message",
            Rejection::WaitlistFull => "waitlist_full",
            Rejection::DuplicateEmail => "duplicate_email",
            Rejection::IpRateLimited => "ip_rate_limited",
        }
    }
}

/// Error raised by the admission services. Rejections are the expected
/// business outcomes; store faults propagate separately so the presentation
/// layer can map them to a generic failure response.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error(transparent)]
    Store(StoreError),
}

fn rate_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::hours(24)
}

/// Waitlist admission pipeline: ordered validation and anti-abuse checks
/// followed by a single insert. Holds no mutable state of its own; every
/// count is re-derived from the store.
pub struct WaitlistAdmission<S> {
    store: Arc<S>,
    config: AdmissionConfig,
}

impl<S> WaitlistAdmission<S>
where
    S: WaitlistStore + 'static,
{
    pub fn new(store: Arc<S>, config: AdmissionConfig) -> Self {
        Self { store, config }
    }

    /// Run the admission checks in order, first failure wins:
    /// name, email shape, capacity, duplicate email, per-IP throttle.
    /// Exactly one insert happens on success and none on any failure path.
    pub fn admit(&self, request: SignupRequest) -> Result<AdmittedSignup, AdmissionError> {
        let name = normalize_name(&request.name)?;
        let email = normalize_email(&request.email)?;

        let prior_count = self.store.count().map_err(AdmissionError::Store)?;
        if prior_count >= u64::from(self.config.max_waitlist_entries) {
            return Err(Rejection::WaitlistFull.into());
        }

        let existing = self
            .store
            .find_by_email(&email)
            .map_err(AdmissionError::Store)?;
        if existing.is_some() {
            return Err(Rejection::DuplicateEmail.into());
        }

        let since = rate_window_start(Utc::now());
        let from_ip = self
            .store
            .count_from_ip_since(&request.ip_address, since)
            .map_err(AdmissionError::Store)?;
        if from_ip >= u64::from(self.config.max_signups_per_ip_per_24h) {
            return Err(Rejection::IpRateLimited.into());
        }

        // Position is the count observed before the insert plus one: an
        // approximate rank, not a sequence guarantee under concurrent load.
        let position = prior_count + 1;
        let entry = self
            .store
            .insert(NewWaitlistEntry {
                name,
                email,
                ip_address: request.ip_address,
                user_agent: request.user_agent,
                position,
                status: WaitlistStatus::Pending,
            })
            .map_err(|err| match err {
                // A racing request can slip past the duplicate pre-check;
                // the unique index rejects it here and the loser sees the
                // same rejection as if the pre-check had caught it.
                StoreError::EmailTaken => AdmissionError::Rejected(Rejection::DuplicateEmail),
                other => AdmissionError::Store(other),
            })?;

        Ok(AdmittedSignup { entry, position })
    }
}

/// Contact-form admission pipeline. Validation plus a per-IP throttle; no
/// capacity ceiling, no duplicate-email constraint, no position.
pub struct ContactAdmission<S> {
    store: Arc<S>,
    config: AdmissionConfig,
}

impl<S> ContactAdmission<S>
where
    S: ContactStore + 'static,
{
    pub fn new(store: Arc<S>, config: AdmissionConfig) -> Self {
        Self { store, config }
    }

    pub fn admit(&self, request: ContactRequest) -> Result<ContactEntry, AdmissionError> {
        let name = normalize_name(&request.name)?;
        let email = normalize_email(&request.email)?;
        let subject = normalize_subject(&request.subject)?;
        let message = normalize_message(&request.message)?;

        let since = rate_window_start(Utc::now());
        let from_ip = self
            .store
            .count_from_ip_since(&request.ip_address, since)
            .map_err(AdmissionError::Store)?;
        if from_ip >= u64::from(self.config.max_contacts_per_ip_per_24h) {
            return Err(Rejection::IpRateLimited.into());
        }

        self.store
            .insert(NewContactEntry {
                name,
                email,
                subject,
                message,
                ip_address: request.ip_address,
                user_agent: request.user_agent,
            })
            .map_err(AdmissionError::Store)
    }
}

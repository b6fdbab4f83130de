//! Waitlist and contact-form admission pipelines.
//!
//! Both pipelines run an ordered sequence of checks against a caller-supplied
//! store and perform at most one insert. The check-then-insert sequence is
//! deliberately non-atomic: the store's unique email index is the real
//! de-duplication enforcement point, and the capacity ceiling is a soft bound
//! that concurrent requests may overshoot by at most one entry each.

pub mod domain;
pub mod router;
pub mod service;
pub mod stats;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AdmittedSignup, ContactEntry, ContactRequest, NewContactEntry, NewWaitlistEntry,
    SignupRequest, WaitlistEntry, WaitlistStatus,
};
pub use router::{signup_router, SignupConfirmation, SignupState};
pub use service::{AdmissionError, ContactAdmission, Rejection, WaitlistAdmission};
pub use stats::{StatsReporter, WaitlistStats};
pub use store::{ContactStore, StoreError, WaitlistStore};

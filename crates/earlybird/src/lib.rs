//! Admission-control core for the Earlybird marketing site.
//!
//! The crate owns the waitlist and contact-form admission pipelines, the
//! read-only stats path, and the shared validation rules. Persistence is a
//! capability supplied by the caller through the traits in
//! [`signup::store`]; the HTTP shell lives in the `earlybird-api` service.

pub mod config;
pub mod error;
pub mod signup;
pub mod telemetry;

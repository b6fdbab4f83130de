use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle tag for a waitlist entry. Admission always assigns [`Pending`];
/// later transitions happen outside the admission core and never feed back
/// into it.
///
/// [`Pending`]: WaitlistStatus::Pending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    #[default]
    Pending,
    Confirmed,
    Notified,
    Converted,
}

impl WaitlistStatus {
    pub const fn label(self) -> &'static str {
        match self {
            WaitlistStatus::Pending => "pending",
            WaitlistStatus::Confirmed => "confirmed",
            WaitlistStatus::Notified => "notified",
            WaitlistStatus::Converted => "converted",
        }
    }
}

/// A stored waitlist record. The email is held in normalized form (trimmed,
/// lowercased) and is unique across all entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub name: String,
    pub email: String,
    pub ip_address: String,
    pub user_agent: String,
    /// 1-based rank assigned at admission time. Approximate under concurrent
    /// load and never renumbered when earlier entries are removed.
    pub position: u64,
    pub status: WaitlistStatus,
    pub joined_at: DateTime<Utc>,
}

/// A stored contact-form record. No uniqueness constraint applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

/// Raw waitlist signup as extracted by the presentation layer. The IP and
/// user agent are trusted as given; "unknown" stands in when the transport
/// could not supply them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub ip_address: String,
    pub user_agent: String,
}

/// Raw contact-form submission as extracted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub ip_address: String,
    pub user_agent: String,
}

/// Validated insert payload handed to the waitlist store. Fields are already
/// normalized; the store only adds the creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWaitlistEntry {
    pub name: String,
    pub email: String,
    pub ip_address: String,
    pub user_agent: String,
    pub position: u64,
    pub status: WaitlistStatus,
}

/// Validated insert payload handed to the contact store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactEntry {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub ip_address: String,
    pub user_agent: String,
}

/// Successful waitlist admission: the stored entry plus its approximate rank
/// (the entry count observed before the insert, plus one).
#[derive(Debug, Clone, PartialEq)]
pub struct AdmittedSignup {
    pub entry: WaitlistEntry,
    pub position: u64,
}

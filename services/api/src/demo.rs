use crate::infra::{InMemoryContacts, InMemoryWaitlist};
use clap::Args;
use std::sync::Arc;

use earlybird::config::AdmissionConfig;
use earlybird::error::AppError;
use earlybird::signup::{
    AdmissionError, ContactAdmission, ContactRequest, SignupRequest, StatsReporter,
    WaitlistAdmission,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Waitlist capacity used for the demo run
    #[arg(long)]
    pub(crate) capacity: Option<u32>,
    /// Per-IP signup limit used for the demo run
    #[arg(long)]
    pub(crate) ip_limit: Option<u32>,
}

/// Walk the admission rules end to end against in-memory stores: a fresh
/// signup, a duplicate, a per-IP throttle trip, a contact submission, and
/// the resulting stats.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut config = AdmissionConfig::default();
    if let Some(capacity) = args.capacity {
        config.max_waitlist_entries = capacity;
    }
    if let Some(limit) = args.ip_limit {
        config.max_signups_per_ip_per_24h = limit;
    }

    let waitlist_store = Arc::new(InMemoryWaitlist::default());
    let contact_store = Arc::new(InMemoryContacts::default());
    let waitlist = WaitlistAdmission::new(waitlist_store.clone(), config);
    let contacts = ContactAdmission::new(contact_store, config);
    let stats = StatsReporter::new(waitlist_store, config);

    println!("== Earlybird admission demo ==");
    println!(
        "capacity={} signups_per_ip_24h={} contacts_per_ip_24h={}",
        config.max_waitlist_entries,
        config.max_signups_per_ip_per_24h,
        config.max_contacts_per_ip_per_24h
    );
    println!();

    let demo_ip = "203.0.113.7";
    let emails = [
        "jane@example.com",
        "jane@example.com",
        "amir@example.com",
        "li.wei@example.com",
        "sofia@example.com",
    ];

    for email in emails {
        let request = SignupRequest {
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            ip_address: demo_ip.to_string(),
            user_agent: "earlybird-demo".to_string(),
        };
        match waitlist.admit(request) {
            Ok(admitted) => {
                println!("admitted  {email:<22} position {}", admitted.position);
            }
            Err(AdmissionError::Rejected(rejection)) => {
                println!("rejected  {email:<22} {} ({})", rejection, rejection.code());
            }
            Err(AdmissionError::Store(error)) => {
                println!("store error for {email}: {error}");
            }
        }
    }

    println!();
    let request = ContactRequest {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        subject: "Beta access".to_string(),
        message: "A waitlisted email can still reach support.".to_string(),
        ip_address: demo_ip.to_string(),
        user_agent: "earlybird-demo".to_string(),
    };
    match contacts.admit(request) {
        Ok(entry) => println!("contact accepted from {} at {}", entry.email, entry.created_at),
        Err(error) => println!("contact rejected: {error}"),
    }

    println!();
    match stats.waitlist_stats() {
        Ok(stats) => {
            println!(
                "stats: {} total, {} in the last 24h, {}% of capacity {}",
                stats.total_signups,
                stats.recent_signups_24h,
                stats.percentage_full,
                stats.capacity
            );
        }
        Err(error) => println!("stats unavailable: {error}"),
    }

    Ok(())
}

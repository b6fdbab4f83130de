use crate::signup::service::Rejection;
use crate::signup::validation::{
    normalize_email, normalize_message, normalize_name, normalize_subject,
};

#[test]
fn names_are_trimmed_and_length_checked() {
    assert_eq!(normalize_name("  Jane Doe  ").unwrap(), "Jane Doe");
    assert_eq!(normalize_name("O'Brien-Smith Jr.").unwrap(), "O'Brien-Smith Jr.");
    assert_eq!(normalize_name("José").unwrap(), "José");

    assert_eq!(normalize_name("J"), Err(Rejection::InvalidName));
    assert_eq!(normalize_name("   "), Err(Rejection::InvalidName));
    assert_eq!(normalize_name(&"a".repeat(51)), Err(Rejection::InvalidName));
}

#[test]
fn names_reject_disallowed_characters() {
    assert_eq!(normalize_name("Jane<script>"), Err(Rejection::InvalidName));
    assert_eq!(normalize_name("Jane123"), Err(Rejection::InvalidName));
    assert_eq!(normalize_name("jane@x.com"), Err(Rejection::InvalidName));
}

#[test]
fn emails_are_lowercased_and_trimmed() {
    assert_eq!(normalize_email(" Jane@X.COM ").unwrap(), "jane@x.com");
    assert_eq!(normalize_email("a.b+tag@sub.domain.io").unwrap(), "a.b+tag@sub.domain.io");
}

#[test]
fn emails_must_match_the_simple_shape() {
    for email in [
        "",
        "plain",
        "no-at.example.com",
        "@x.com",
        "jane@",
        "jane@tld-less",
        "jane@x.c",
        "two@@x.com",
        "spaced jane@x.com",
    ] {
        assert_eq!(normalize_email(email), Err(Rejection::InvalidEmail), "{email:?}");
    }
}

#[test]
fn emails_over_254_bytes_are_rejected() {
    let long_local = "a".repeat(250);
    assert_eq!(
        normalize_email(&format!("{long_local}@x.com")),
        Err(Rejection::InvalidEmail)
    );
}

#[test]
fn subject_and_message_are_length_checked() {
    assert_eq!(normalize_subject(" Beta access ").unwrap(), "Beta access");
    assert_eq!(normalize_subject("Hi"), Err(Rejection::InvalidSubject));
    assert_eq!(
        normalize_subject(&"s".repeat(101)),
        Err(Rejection::InvalidSubject)
    );

    assert_eq!(
        normalize_message("Tell me more, please.").unwrap(),
        "Tell me more, please."
    );
    assert_eq!(normalize_message("short"), Err(Rejection::InvalidMessage));
    assert_eq!(
        normalize_message(&"m".repeat(1001)),
        Err(Rejection::InvalidMessage)
    );
}

#[test]
fn rejection_codes_are_stable() {
    assert_eq!(Rejection::InvalidName.code(), "invalid_name");
    assert_eq!(Rejection::InvalidEmail.code(), "invalid_email");
    assert_eq!(Rejection::InvalidSubject.code(), "invalid_subject");
    assert_eq!(Rejection::InvalidMessage.code(), "invalid_message");
    assert_eq!(Rejection::WaitlistFull.code(), "waitlist_full");
    assert_eq!(Rejection::DuplicateEmail.code(), "duplicate_email");
    assert_eq!(Rejection::IpRateLimited.code(), "ip_rate_limited");
}

//! Shared, I/O-free validators used identically by both admission pipelines.
//! Keeping them in one place guarantees a name or email rejected by the
//! waitlist is rejected the same way by the contact form.

use super::service::Rejection;

const MIN_NAME_CHARS: usize = 2;
const MAX_NAME_CHARS: usize = 50;
const MAX_EMAIL_BYTES: usize = 254;
const MIN_SUBJECT_CHARS: usize = 3;
const MAX_SUBJECT_CHARS: usize = 100;
const MIN_MESSAGE_CHARS: usize = 10;
const MAX_MESSAGE_CHARS: usize = 1000;

/// Trim and validate a submitted name. Letters in any script plus space,
/// hyphen, apostrophe, and period are allowed.
pub fn normalize_name(raw: &str) -> Result<String, Rejection> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&chars) {
        return Err(Rejection::InvalidName);
    }
    if !trimmed.chars().all(is_name_char) {
        return Err(Rejection::InvalidName);
    }
    Ok(trimmed.to_string())
}

fn is_name_char(c: char) -> bool {
    c.is_alphabetic() || matches!(c, ' ' | '-' | '\'' | '.')
}

/// Trim, lowercase, and shape-check an email address. The check is the
/// simple `local@domain.tld` shape, not full RFC 5321: exactly one `@`,
/// non-empty local part, and a domain with at least one dot-separated label
/// on each side.
pub fn normalize_email(raw: &str) -> Result<String, Rejection> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() || normalized.len() > MAX_EMAIL_BYTES {
        return Err(Rejection::InvalidEmail);
    }
    if normalized.chars().any(char::is_whitespace) {
        return Err(Rejection::InvalidEmail);
    }

    let (local, domain) = normalized.split_once('@').ok_or(Rejection::InvalidEmail)?;
    if local.is_empty() || domain.contains('@') {
        return Err(Rejection::InvalidEmail);
    }

    let (host, tld) = domain.rsplit_once('.').ok_or(Rejection::InvalidEmail)?;
    if host.is_empty() || host.starts_with('.') || tld.len() < 2 {
        return Err(Rejection::InvalidEmail);
    }

    Ok(normalized)
}

/// Trim and length-check a contact subject line.
pub fn normalize_subject(raw: &str) -> Result<String, Rejection> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();
    if !(MIN_SUBJECT_CHARS..=MAX_SUBJECT_CHARS).contains(&chars) {
        return Err(Rejection::InvalidSubject);
    }
    Ok(trimmed.to_string())
}

/// Trim and length-check a contact message body.
pub fn normalize_message(raw: &str) -> Result<String, Rejection> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();
    if !(MIN_MESSAGE_CHARS..=MAX_MESSAGE_CHARS).contains(&chars) {
        return Err(Rejection::InvalidMessage);
    }
    Ok(trimmed.to_string())
}

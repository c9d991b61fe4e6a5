//! Component UID syntax rules

use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_UID_LENGTH: usize = 64;

static UID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid uid regex"));

/// Check a single UID. Returns the message shown to the user on failure.
pub fn validate_uid(uid: &str) -> Result<(), String> {
    if uid.trim().is_empty() {
        return Err("A UID is required".to_string());
    }
    if uid.len() > MAX_UID_LENGTH {
        return Err(format!(
            "UIDs must be {} characters or less",
            MAX_UID_LENGTH
        ));
    }
    if !UID_PATTERN.is_match(uid) {
        return Err(
            "UIDs may only contain alphanumeric characters, periods, dashes, and underscores"
                .to_string(),
        );
    }
    Ok(())
}

/// Check a UID against the syntax rule and the values already chosen
pub fn validate_unique_uid<'a, I>(uid: &str, taken: I) -> Result<(), String>
where
    I: IntoIterator<Item = &'a String>,
{
    validate_uid(uid)?;
    if taken.into_iter().any(|existing| existing == uid) {
        return Err(format!(
            "The UID '{}' is already used by another component. UIDs must be unique",
            uid
        ));
    }
    Ok(())
}

//! Input validation for registration payloads

use regex::Regex;
use std::sync::OnceLock;

/// Validate a username: 3..=24 characters from [A-Za-z0-9_]
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username must not be empty".to_string());
    }

    if !(3..=24).contains(&username.len()) {
        return Err("Username must be between 3 and 24 characters".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username may only contain letters, digits, and underscores".to_string());
    }

    Ok(())
}

/// Validate an email address structurally (local part, @, dotted domain)
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email must not be empty".to_string());
    }

    if email.len() > 254 {
        return Err("Email address is too long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Email address is not valid".to_string());
    }

    Ok(())
}

/// Validate a password: length bounds only, no complexity rules
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password must not be empty".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters".to_string());
    }

    Ok(())
}

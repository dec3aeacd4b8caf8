//! Field format validation
//!
//! Classifies user-supplied strings against fixed regional formats:
//! usernames, email addresses, Egyptian mobile numbers and Egyptian
//! national identifiers. Every validator is total: absent or empty input
//! yields `false`, malformed input yields `false`, nothing ever errors.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use super::national_id::NationalId;

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static LOCAL_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(010|011|012|015)[0-9]{8}$").unwrap());

static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^20(10|11|12|15)[0-9]{8}$").unwrap());

/// Returns the value only when it is present and non-empty
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Validates a username
///
/// Accepts 3 to 20 characters, each an ASCII letter, digit or underscore.
pub fn is_valid_username(value: Option<&str>) -> bool {
    present(value).is_some_and(|v| USERNAME_REGEX.is_match(v))
}

/// Validates an email address of the form `local@domain.tld`
///
/// The local part allows letters, digits, `.`, `_` and `-`; the domain
/// allows letters, digits, `.` and `-`; the final label must be at least
/// two letters.
pub fn is_valid_email(value: Option<&str>) -> bool {
    present(value).is_some_and(|v| EMAIL_REGEX.is_match(v))
}

/// Validates a local mobile number: `010`, `011`, `012` or `015` followed by 8 digits
pub fn is_valid_local_phone(value: Option<&str>) -> bool {
    present(value).is_some_and(|v| LOCAL_PHONE_REGEX.is_match(v))
}

/// Validates an international mobile number: `20`, then `10`, `11`, `12` or `15`, then 8 digits
pub fn is_valid_international_phone(value: Option<&str>) -> bool {
    present(value).is_some_and(|v| INTERNATIONAL_PHONE_REGEX.is_match(v))
}

/// Validates a mobile number in either local or international format
pub fn is_valid_phone(value: Option<&str>) -> bool {
    is_valid_local_phone(value) || is_valid_international_phone(value)
}

/// Validates a 14-digit national identifier
///
/// Checks the digit pattern first, then the century code, month (1-12),
/// day (1-31, independent of month) and governorate code (1-88).
/// See [`NationalId`] for the field layout.
pub fn is_valid_national_id(value: Option<&str>) -> bool {
    present(value).is_some_and(|v| NationalId::parse(v).is_some())
}

/// The kinds of field this module knows how to validate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Username,
    Email,
    Phone,
    NationalId,
}

impl FieldKind {
    /// All kinds, in display order
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Username,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::NationalId,
    ];

    /// Runs the validator matching this kind
    pub fn validate(self, value: Option<&str>) -> bool {
        match self {
            FieldKind::Username => is_valid_username(value),
            FieldKind::Email => is_valid_email(value),
            FieldKind::Phone => is_valid_phone(value),
            FieldKind::NationalId => is_valid_national_id(value),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Username => "username",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::NationalId => "national-id",
        };
        f.write_str(name)
    }
}

impl FromStr for FieldKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "username" => Ok(FieldKind::Username),
            "email" => Ok(FieldKind::Email),
            "phone" => Ok(FieldKind::Phone),
            "national-id" | "national_id" => Ok(FieldKind::NationalId),
            other => Err(anyhow::anyhow!(
                "Unknown field kind '{}' (expected username, email, phone or national-id)",
                other
            )),
        }
    }
}

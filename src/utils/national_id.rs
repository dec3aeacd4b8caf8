//! Egyptian national identifier
//!
//! A national ID is 14 ASCII digits with positional fields:
//!
//! | Positions | Field | Rule |
//! |---|---|---|
//! | 0 | century code | `2` (1900s) or `3` (2000s) |
//! | 1-2 | year within century | unchecked |
//! | 3-4 | birth month | 1-12 |
//! | 5-6 | birth day | 1-31, not checked against the month |
//! | 7-8 | governorate code | 1-88 |
//! | 9-13 | sequence and check digits | unchecked |

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static NATIONAL_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{14}$").unwrap());

const CENTURY_POS: usize = 0;
const YEAR_POS: usize = 1;
const MONTH_POS: usize = 3;
const DAY_POS: usize = 5;
const GOVERNORATE_POS: usize = 7;

/// Highest governorate code accepted
pub const MAX_GOVERNORATE: u8 = 88;

/// A national ID that passed every structural check
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NationalId {
    digits: String,
}

impl NationalId {
    /// Parses and checks a national ID
    ///
    /// # Returns
    /// - `Some(id)` if the value is 14 digits with a valid century code,
    ///   month, day and governorate
    /// - `None` otherwise
    pub fn parse(value: &str) -> Option<Self> {
        if !NATIONAL_ID_REGEX.is_match(value) {
            return None;
        }

        let bytes = value.as_bytes();
        if !matches!(bytes[CENTURY_POS], b'2' | b'3') {
            return None;
        }

        let month = two_digits(bytes, MONTH_POS);
        let day = two_digits(bytes, DAY_POS);
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }

        let governorate = two_digits(bytes, GOVERNORATE_POS);
        if !(1..=MAX_GOVERNORATE).contains(&governorate) {
            return None;
        }

        Some(Self {
            digits: value.to_string(),
        })
    }

    /// The century code digit (2 or 3)
    pub fn century_code(&self) -> u8 {
        self.digits.as_bytes()[CENTURY_POS] - b'0'
    }

    /// Full birth year derived from the century code and the two year digits
    pub fn birth_year(&self) -> u16 {
        let base = if self.century_code() == 2 { 1900 } else { 2000 };
        base + u16::from(two_digits(self.digits.as_bytes(), YEAR_POS))
    }

    pub fn month(&self) -> u8 {
        two_digits(self.digits.as_bytes(), MONTH_POS)
    }

    pub fn day(&self) -> u8 {
        two_digits(self.digits.as_bytes(), DAY_POS)
    }

    pub fn governorate(&self) -> u8 {
        two_digits(self.digits.as_bytes(), GOVERNORATE_POS)
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

// Callers guarantee `bytes` is all ASCII digits and long enough.
fn two_digits(bytes: &[u8], at: usize) -> u8 {
    (bytes[at] - b'0') * 10 + (bytes[at + 1] - b'0')
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl FromStr for NationalId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        NationalId::parse(s).ok_or_else(|| anyhow::anyhow!("Invalid national ID: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracts_fields() {
        let id = NationalId::parse("29902150112345").unwrap();
        assert_eq!(id.century_code(), 2);
        assert_eq!(id.birth_year(), 1999);
        assert_eq!(id.month(), 2);
        assert_eq!(id.day(), 15);
        assert_eq!(id.governorate(), 1);
        assert_eq!(id.as_str(), "29902150112345");
    }

    #[test]
    fn test_century_three_is_2000s() {
        let id = NationalId::parse("30501018812345").unwrap();
        assert_eq!(id.birth_year(), 2005);
        assert_eq!(id.governorate(), 88);
    }

    #[test]
    fn test_rejects_bad_century() {
        assert!(NationalId::parse("19902150112345").is_none());
        assert!(NationalId::parse("49902150112345").is_none());
    }

    #[test]
    fn test_month_range() {
        assert!(NationalId::parse("29900150112345").is_none());
        assert!(NationalId::parse("29913150112345").is_none());
        assert!(NationalId::parse("29912150112345").is_some());
    }

    #[test]
    fn test_day_range_ignores_month_length() {
        assert!(NationalId::parse("29902000112345").is_none());
        assert!(NationalId::parse("29902320112345").is_none());
        // 30 February is accepted: day is range-checked only
        assert!(NationalId::parse("29902300112345").is_some());
        assert!(NationalId::parse("29904310112345").is_some());
    }

    #[test]
    fn test_governorate_range() {
        assert!(NationalId::parse("29902150012345").is_none());
        assert!(NationalId::parse("29902158912345").is_none());
        assert!(NationalId::parse("29902159912345").is_none());
        assert!(NationalId::parse("29902158812345").is_some());
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        // Arabic-Indic digits are not accepted
        assert!(NationalId::parse("٢٩٩٠٢١٥٠١١٢٣٤٥").is_none());
        assert!(NationalId::parse("2990215011234a").is_none());
    }

    #[test]
    fn test_from_str_and_display() {
        let id: NationalId = "29902150112345".parse().unwrap();
        assert_eq!(id.to_string(), "29902150112345");
        assert!("29902159912345".parse::<NationalId>().is_err());
    }
}

//! Share codes: the four-digit identifiers people read out to each other.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Smallest code that can be issued.
pub const MIN_CODE: u16 = 1000;
/// Largest code that can be issued.
pub const MAX_CODE: u16 = 9999;

/// A validated share code: exactly four ASCII digits in `1000..=9999`.
///
/// The range excludes leading zeros, so the decimal rendering is always
/// four characters long without padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShareCode(String);

impl ShareCode {
    /// Build a code from a number in the issuable range.
    pub fn from_number(n: u16) -> Result<Self, AppError> {
        if !(MIN_CODE..=MAX_CODE).contains(&n) {
            return Err(AppError::validation(format!(
                "Share code {n} is outside {MIN_CODE}..={MAX_CODE}"
            )));
        }
        Ok(Self(n.to_string()))
    }

    /// Parse user input into a code.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let trimmed = input.trim();
        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::validation("Share code must be exactly 4 digits"));
        }
        let n: u16 = trimmed
            .parse()
            .map_err(|_| AppError::validation("Share code must be exactly 4 digits"))?;
        Self::from_number(n)
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShareCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShareCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShareCode> for String {
    fn from(code: ShareCode) -> String {
        code.0
    }
}

impl AsRef<str> for ShareCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

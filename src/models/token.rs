use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

/// A token as listed by the server. The secret itself is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenSummary {
    pub token_id: String,
    /// Unix timestamp, seconds.
    pub created_at: i64,
    pub last_4_digits: String,
}

impl TokenSummary {
    pub fn masked(&self) -> String {
        mask(&self.last_4_digits)
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenListResponse {
    pub tokens: Vec<TokenSummary>,
}

/// Response of the generate endpoint. `token` is the full secret and is
/// returned exactly once.
#[derive(Debug, Deserialize)]
pub struct GeneratedToken {
    pub token: Secret,
    pub token_id: String,
    pub created_at: i64,
    pub last_4_digits: String,
}

/// Plaintext token value. The buffer is wiped on drop and never printed
/// by `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(****)")
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Secret::new)
    }
}

/// Display form of a token: asterisks followed by its last four digits.
pub fn mask(last_4_digits: &str) -> String {
    format!("****{}", last_4_digits)
}

/// Format a creation timestamp as `YYYY-MM-DD HH:MM` in `tz`.
pub fn format_created_at<Tz>(timestamp: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string(),
        None => "Invalid Date".to_string(),
    }
}

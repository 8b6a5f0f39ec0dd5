//! Typed payloads returned by the service.
//!
//! These types are only ever deserialized; the service owns their
//! lifecycle. Missing wire fields decode to their zero values, matching
//! the API's habit of omitting fields it has nothing to say about.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Seconds since the UNIX epoch, as delivered by the service.
///
/// Always interpreted as UTC-based POSIX time regardless of the local
/// zone. The zero value means "never" wherever it appears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Convert into a calendar time value.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime().format("%Y-%m-%d %H:%M:%S %z UTC"))
    }
}

/// Data about a secret, but not the value itself.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Metadata {
    /// Owner of the secret; `"anon"` when created without credentials.
    #[serde(rename = "custid", default)]
    pub customer_id: String,

    /// The unique key for the metadata. Do not share this.
    #[serde(default)]
    pub metadata_key: String,

    /// The unique key for the secret itself. This is the key you share.
    #[serde(default)]
    pub secret_key: String,

    /// Addresses that were emailed a link to the secret (never the
    /// secret itself).
    #[serde(default)]
    pub recipient: Vec<String>,

    /// True if a passphrase was provided when the secret was created.
    #[serde(default)]
    pub passphrase_required: bool,

    /// The time-to-live in seconds that was specified at creation,
    /// not the time remaining.
    #[serde(default)]
    pub ttl: i64,

    /// The remaining time in seconds that the metadata has left to live.
    #[serde(default)]
    pub metadata_ttl: i64,

    /// The remaining time in seconds that the secret has left to live.
    #[serde(default)]
    pub secret_ttl: i64,

    /// When the secret was created.
    #[serde(default)]
    pub created: Timestamp,

    /// When the secret was last updated.
    #[serde(default)]
    pub updated: Timestamp,

    /// When the secret was first viewed by someone. Zero means unviewed.
    #[serde(default)]
    pub received: Timestamp,
}

impl Metadata {
    /// The absolute instant at which this secret expires.
    pub fn deadline(&self) -> DateTime<Utc> {
        self.created.datetime() + chrono::Duration::seconds(self.ttl)
    }

    /// Two-state read classification.
    ///
    /// The service only ever reports the first-view time, so there is no
    /// finer granularity than unread/read.
    pub fn status(&self) -> SecretStatus {
        if self.received.is_zero() {
            SecretStatus::Unread
        } else {
            SecretStatus::Read
        }
    }
}

/// Whether a secret's value has been viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretStatus {
    Unread,
    Read,
}

impl fmt::Display for SecretStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretStatus::Unread => f.write_str("unread"),
            SecretStatus::Read => f.write_str("read"),
        }
    }
}

/// A secret value together with metadata about it.
///
/// Returned by generation and by value retrieval; the plaintext can
/// never be recovered again through the metadata endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedSecret {
    #[serde(flatten)]
    pub metadata: Metadata,

    /// The secret text itself.
    #[serde(default)]
    pub value: String,
}

//! Formatted record timestamps.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `YYYY-MM-DD HH:mm`, minute precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A timestamp as stored in the document.
///
/// Stored values are kept verbatim; only freshly minted timestamps are
/// guaranteed to follow [`TIMESTAMP_FORMAT`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// The current local time.
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Format an arbitrary instant.
    pub fn from_datetime<Tz>(at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self(at.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Returns the formatted text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

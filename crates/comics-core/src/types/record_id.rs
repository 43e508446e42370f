//! Record identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A positive integer identifying a record within the collection.
///
/// Ids are assigned by the repository and are not guaranteed to be unique
/// once records have been deleted (see [`RecordId::next_after`]).
///
/// # Example
///
/// ```
/// use comics_core::RecordId;
///
/// let id: RecordId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert!("0".parse::<RecordId>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RecordId(u64);

impl RecordId {
    /// Create a record id, rejecting zero.
    pub fn new(value: u64) -> Result<Self, Error> {
        if value == 0 {
            return Err(InvalidInputError::RecordId {
                value: value.to_string(),
                reason: "must be a positive integer".to_string(),
            }
            .into());
        }
        Ok(Self(value))
    }

    /// The id handed to the next record appended to a collection of `len`
    /// records: `len + 1`.
    pub fn next_after(len: usize) -> Self {
        Self(len as u64 + 1)
    }

    /// Returns the numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for RecordId {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for u64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u64>().map_err(|e| InvalidInputError::RecordId {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Self::new(value)
    }
}

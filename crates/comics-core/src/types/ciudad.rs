//! City a character operates in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The closed set of cities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ciudad {
    Gotham,
    Metropolis,
    Otro,
}

impl Ciudad {
    /// Every accepted spelling, in declaration order.
    pub const NAMES: &'static [&'static str] = &["Gotham", "Metropolis", "Otro"];

    /// Returns the stored spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ciudad::Gotham => "Gotham",
            Ciudad::Metropolis => "Metropolis",
            Ciudad::Otro => "Otro",
        }
    }

    /// Case-insensitive comparison against a filter value.
    pub fn matches(&self, filter: &str) -> bool {
        self.as_str().to_lowercase() == filter.to_lowercase()
    }
}

impl fmt::Display for Ciudad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ciudad {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Gotham" => Ok(Ciudad::Gotham),
            "Metropolis" => Ok(Ciudad::Metropolis),
            "Otro" => Ok(Ciudad::Otro),
            _ => Err(InvalidInputError::Ciudad {
                value: s.to_string(),
                allowed: Self::NAMES.join(", "),
            }
            .into()),
        }
    }
}

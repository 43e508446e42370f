//! Kind of allies a character has.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The closed set of ally kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipoAliado {
    Humanos,
    Extraterrestres,
    Animales,
}

impl TipoAliado {
    /// Every accepted spelling, in declaration order.
    pub const NAMES: &'static [&'static str] = &["Humanos", "Extraterrestres", "Animales"];

    /// Returns the stored spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoAliado::Humanos => "Humanos",
            TipoAliado::Extraterrestres => "Extraterrestres",
            TipoAliado::Animales => "Animales",
        }
    }
}

impl fmt::Display for TipoAliado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoAliado {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Humanos" => Ok(TipoAliado::Humanos),
            "Extraterrestres" => Ok(TipoAliado::Extraterrestres),
            "Animales" => Ok(TipoAliado::Animales),
            _ => Err(InvalidInputError::TipoAliado {
                value: s.to_string(),
                allowed: Self::NAMES.join(", "),
            }
            .into()),
        }
    }
}

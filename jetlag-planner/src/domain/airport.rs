//! IATA airport codes.
//!
//! Flight feeds and user input disagree on casing ("jfk", "Jfk",
//! "JFK"), so parsing normalizes to the canonical uppercase form
//! rather than rejecting. Everything downstream (metro tables,
//! coordinate lookups, issue messages) can then compare codes directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a string is not an IATA code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidIata {
    /// Input was not exactly three characters
    #[error("IATA code must be 3 letters, got {0} characters")]
    WrongLength(usize),
    /// Input contained a character outside A-Z/a-z
    #[error("IATA code must be ASCII letters, found {0:?}")]
    NotALetter(char),
}

/// A canonical 3-letter IATA airport code.
///
/// Stored as three uppercase ASCII bytes, so the type is `Copy` and
/// comparisons are byte comparisons. Construction goes through
/// [`Iata::parse`], which uppercases as it validates; an `Iata` value
/// is canonical by construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iata([u8; 3]);

impl Iata {
    /// Parse a code, normalizing case.
    ///
    /// Accepts exactly three ASCII letters in any casing; anything
    /// else is rejected with the first offending detail.
    ///
    /// # Examples
    ///
    /// ```
    /// use jetlag_planner::domain::Iata;
    ///
    /// assert_eq!(Iata::parse("syd").unwrap().as_str(), "SYD");
    /// assert!(Iata::parse("SY1").is_err());
    /// assert!(Iata::parse("SYDN").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidIata> {
        let mut chars = s.chars();
        let mut code = [0u8; 3];

        for slot in &mut code {
            let c = chars.next().ok_or(InvalidIata::WrongLength(s.chars().count()))?;
            if !c.is_ascii_alphabetic() {
                return Err(InvalidIata::NotALetter(c));
            }
            *slot = c.to_ascii_uppercase() as u8;
        }

        if chars.next().is_some() {
            return Err(InvalidIata::WrongLength(s.chars().count()));
        }

        Ok(Iata(code))
    }

    /// The canonical uppercase form.
    pub fn as_str(&self) -> &str {
        // Contents are ASCII uppercase by construction
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for Iata {
    type Err = InvalidIata;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Iata::parse(s)
    }
}

impl fmt::Display for Iata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Iata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iata({})", self.as_str())
    }
}

impl Serialize for Iata {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Iata {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Iata::parse(&s).map_err(serde::de::Error::custom)
    }
}

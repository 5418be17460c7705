// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const CLASS_ID_MAX_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Proficiency level assigned to one language construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Level {
    Unknown,
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Level {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "A1" => Ok(Self::A1),
            "A2" => Ok(Self::A2),
            "B1" => Ok(Self::B1),
            "B2" => Ok(Self::B2),
            "C1" => Ok(Self::C1),
            "C2" => Ok(Self::C2),
            _ => Err(ParseError::InvalidFormat(
                "level must be one of A1, A2, B1, B2, C1, C2",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Display-message key for a level, resolved through this one typed lookup
/// instead of runtime reflection over the enum shape.
#[must_use]
pub const fn level_display_key(level: Level) -> &'static str {
    match level {
        Level::Unknown => "level.unknown",
        Level::A1 => "level.a1",
        Level::A2 => "level.a2",
        Level::B1 => "level.b1",
        Level::B2 => "level.b2",
        Level::C1 => "level.c1",
        Level::C2 => "level.c2",
    }
}

/// Identifier of one analyzed construct class (the table grouping key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ClassId(String);

impl ClassId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("class id"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("class id"));
        }
        if input.len() > CLASS_ID_MAX_LEN {
            return Err(ParseError::TooLong("class id", CLASS_ID_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClassId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parse_rejects_unknown_spelling() {
        assert!(Level::parse("a1").is_err());
        assert!(Level::parse("D1").is_err());
        assert_eq!(Level::parse("B2"), Ok(Level::B2));
    }

    #[test]
    fn level_round_trips_through_str() {
        for level in [Level::A1, Level::A2, Level::B1, Level::B2, Level::C1, Level::C2] {
            assert_eq!(Level::parse(level.as_str()), Ok(level));
        }
    }

    #[test]
    fn class_id_rejects_whitespace_padding() {
        assert!(ClassId::parse(" list_comprehension").is_err());
        assert!(ClassId::parse("").is_err());
        assert_eq!(
            ClassId::parse("list_comprehension").map(|c| c.as_str().to_string()),
            Ok("list_comprehension".to_string())
        );
    }

    #[test]
    fn every_level_has_a_display_key() {
        for level in [
            Level::Unknown,
            Level::A1,
            Level::A2,
            Level::B1,
            Level::B2,
            Level::C1,
            Level::C2,
        ] {
            assert!(level_display_key(level).starts_with("level."));
        }
    }
}

//! Direction and headsign types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a direction id is neither 0 nor 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction id {0}: must be 0 or 1")]
pub struct InvalidDirectionId(pub u8);

/// One of the two directions of travel of a route.
///
/// # Examples
///
/// ```
/// use schedule_normalizer::domain::DirectionId;
///
/// assert_eq!(DirectionId::parse(1).unwrap(), DirectionId::ONE);
/// assert!(DirectionId::parse(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DirectionId(u8);

impl DirectionId {
    /// Direction 0.
    pub const ZERO: DirectionId = DirectionId(0);
    /// Direction 1.
    pub const ONE: DirectionId = DirectionId(1);
    /// Both directions, in index order.
    pub const BOTH: [DirectionId; 2] = [DirectionId::ZERO, DirectionId::ONE];

    /// Parse a direction id, which must be 0 or 1.
    pub fn parse(value: u8) -> Result<Self, InvalidDirectionId> {
        match value {
            0 | 1 => Ok(DirectionId(value)),
            other => Err(InvalidDirectionId(other)),
        }
    }

    /// Position of this direction in a two-element array.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl TryFrom<u8> for DirectionId {
    type Error = InvalidDirectionId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DirectionId::parse(value)
    }
}

impl From<DirectionId> for u8 {
    fn from(value: DirectionId) -> Self {
        value.0
    }
}

impl fmt::Display for DirectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A compass direction used as a symbolic headsign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    /// Match a headsign that is exactly one cardinal word, ignoring case and
    /// surrounding whitespace.
    ///
    /// ```
    /// use schedule_normalizer::domain::CardinalDirection;
    ///
    /// assert_eq!(CardinalDirection::parse("East"), Some(CardinalDirection::East));
    /// assert_eq!(CardinalDirection::parse(" WEST "), Some(CardinalDirection::West));
    /// assert_eq!(CardinalDirection::parse("Eastern Passage"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        [
            ("north", CardinalDirection::North),
            ("south", CardinalDirection::South),
            ("east", CardinalDirection::East),
            ("west", CardinalDirection::West),
        ]
        .into_iter()
        .find(|(word, _)| text.eq_ignore_ascii_case(word))
        .map(|(_, dir)| dir)
    }

    /// Uppercase name, as shown in diagnostics and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardinalDirection::North => "NORTH",
            CardinalDirection::South => "SOUTH",
            CardinalDirection::East => "EAST",
            CardinalDirection::West => "WEST",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The destination shown to riders for a trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Headsign {
    /// A canonical place label, e.g. "Bridge Term"
    Text(String),
    /// A compass direction, used for loop routes named "East"/"West"
    Cardinal(CardinalDirection),
}

impl Headsign {
    /// Creates a text headsign.
    pub fn text(label: impl Into<String>) -> Self {
        Headsign::Text(label.into())
    }

    /// Returns the label if this is a text headsign.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Headsign::Text(label) => Some(label),
            Headsign::Cardinal(_) => None,
        }
    }
}

impl fmt::Display for Headsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Headsign::Text(label) => f.write_str(label),
            Headsign::Cardinal(dir) => write!(f, "{dir}"),
        }
    }
}

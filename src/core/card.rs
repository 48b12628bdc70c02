//! Card codes.
//!
//! A card is an opaque string code ("2".."9" for energy cards, "e2" for
//! the exhaustion card). Cards carry no identity beyond their code:
//! duplicates are common and interchangeable. Ordering is numeric-aware
//! so deck listings read `2,3,...,9,e2` rather than lexicographically.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A card, identified by its string code.
///
/// ```
/// use peloton::core::Card;
///
/// let five = Card::new("5");
/// assert_eq!(five.numeric_value(), Some(5));
/// assert!(!five.is_exhaustion());
///
/// let fatigue = Card::exhaustion();
/// assert!(fatigue.is_exhaustion());
/// assert_eq!(fatigue.numeric_value(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(String);

impl Card {
    /// Code of the exhaustion (fatigue) card.
    pub const EXHAUSTION_CODE: &'static str = "e2";

    /// Create a card from its code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Create an exhaustion card.
    #[must_use]
    pub fn exhaustion() -> Self {
        Self(Self::EXHAUSTION_CODE.to_string())
    }

    /// The card's code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether this is the exhaustion card.
    #[must_use]
    pub fn is_exhaustion(&self) -> bool {
        self.0 == Self::EXHAUSTION_CODE
    }

    /// Parse the code as a number, if it is one.
    ///
    /// Used by the report layer to display breakaway bid sums.
    /// The exhaustion card has no numeric value.
    #[must_use]
    pub fn numeric_value(&self) -> Option<i32> {
        self.0.parse().ok()
    }
}

impl From<u8> for Card {
    fn from(value: u8) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Card {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric_value(), other.numeric_value()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

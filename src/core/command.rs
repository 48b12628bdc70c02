//! Shorthand command parsing.
//!
//! Bulk actions arrive as compact text: `"r5 s3"` plays card `5` for the
//! rider with role code `R` and card `3` for `S`; `"r s"` adds one
//! exhaustion card to each. Tokens are whitespace-separated and role
//! matching is case-insensitive.
//!
//! Parsing is strict and happens before any dispatch: a malformed token
//! fails the whole command with `MalformedToken`, and role codes are
//! validated against the team before the first card moves.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::error::{PelotonError, Result};

/// Single-character role key identifying a rider within a team.
///
/// Normalized to ASCII uppercase at construction, so `r` and `R`
/// address the same rider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleCode(char);

impl RoleCode {
    /// Create a role code, normalizing case.
    #[must_use]
    pub fn new(code: char) -> Self {
        Self(code.to_ascii_uppercase())
    }

    /// The normalized role character.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for RoleCode {
    fn from(code: char) -> Self {
        Self::new(code)
    }
}

impl std::fmt::Display for RoleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parsed shorthand command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Play a card for the rider with the given role.
    Play { role: RoleCode, card: Card },
    /// Add an exhaustion card to the rider with the given role.
    Exhaust { role: RoleCode },
}

impl Command {
    /// The role this command addresses.
    #[must_use]
    pub fn role(&self) -> RoleCode {
        match self {
            Command::Play { role, .. } | Command::Exhaust { role } => *role,
        }
    }
}

/// Parse a play command string: `<roleChar><cardCode>` tokens.
///
/// ```
/// use peloton::core::{parse_play_commands, Card, Command, RoleCode};
///
/// let commands = parse_play_commands("r5 S3").unwrap();
/// assert_eq!(
///     commands,
///     vec![
///         Command::Play { role: RoleCode::new('R'), card: Card::new("5") },
///         Command::Play { role: RoleCode::new('S'), card: Card::new("3") },
///     ]
/// );
/// ```
///
/// A token without a card code (e.g. `"r"`) is malformed.
pub fn parse_play_commands(input: &str) -> Result<Vec<Command>> {
    input
        .split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            let role = chars
                .next()
                .ok_or_else(|| PelotonError::MalformedToken(token.to_string()))?;
            let code = chars.as_str();
            if code.is_empty() {
                return Err(PelotonError::MalformedToken(token.to_string()));
            }
            Ok(Command::Play {
                role: RoleCode::new(role),
                card: Card::new(code),
            })
        })
        .collect()
}

/// Parse an exhaustion command string: single `<roleChar>` tokens.
///
/// A token longer than one character is malformed.
pub fn parse_exhaust_commands(input: &str) -> Result<Vec<Command>> {
    input
        .split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(role), None) => Ok(Command::Exhaust {
                    role: RoleCode::new(role),
                }),
                _ => Err(PelotonError::MalformedToken(token.to_string())),
            }
        })
        .collect()
}

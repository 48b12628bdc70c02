//! Riders: deck ownership, identity, and per-stage flags.

use serde::{Deserialize, Serialize};

use crate::core::{Card, RoleCode, ShuffleRng};
use crate::deck::Deck;

/// Energy deck of the standard Rouleur.
pub const ROULEUR_ENERGY: [u8; 15] = [3, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6, 7, 7, 7];

/// Energy deck of the standard Sprinteur.
pub const SPRINTEUR_ENERGY: [u8; 15] = [2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 9, 9, 9];

/// A rider: a named deck with two per-stage flags.
///
/// The deck is held by composition, so it stays independently testable;
/// the rider adds identity and the `finished_stage` / `in_breakaway`
/// flags that the stage machine and legality layer read.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rider {
    name: String,
    role: RoleCode,
    finished_stage: bool,
    in_breakaway: bool,
    deck: Deck,
}

impl Rider {
    /// Create a rider with the given energy deck.
    #[must_use]
    pub fn new(name: impl Into<String>, role: RoleCode, energy_cards: Vec<Card>, rng: ShuffleRng) -> Self {
        Self {
            name: name.into(),
            role,
            finished_stage: false,
            in_breakaway: false,
            deck: Deck::new(energy_cards, rng),
        }
    }

    /// The standard Rouleur (role `R`).
    #[must_use]
    pub fn rouleur(rng: ShuffleRng) -> Self {
        let cards = ROULEUR_ENERGY.iter().map(|&v| Card::from(v)).collect();
        Self::new("Rouleur", RoleCode::new('R'), cards, rng)
    }

    /// The standard Sprinteur (role `S`).
    #[must_use]
    pub fn sprinteur(rng: ShuffleRng) -> Self {
        let cards = SPRINTEUR_ENERGY.iter().map(|&v| Card::from(v)).collect();
        Self::new("Sprinteur", RoleCode::new('S'), cards, rng)
    }

    /// The rider's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rider's role code within its team.
    #[must_use]
    pub fn role(&self) -> RoleCode {
        self.role
    }

    /// The rider's deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Mutable access to the rider's deck.
    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    /// Whether the rider has crossed the finish line this stage.
    #[must_use]
    pub fn finished_stage(&self) -> bool {
        self.finished_stage
    }

    /// Mark the rider as finished (or not) for this stage.
    pub fn set_finished_stage(&mut self, finished: bool) {
        self.finished_stage = finished;
    }

    /// Whether the rider is nominated into the current breakaway.
    #[must_use]
    pub fn in_breakaway(&self) -> bool {
        self.in_breakaway
    }

    /// Nominate the rider into (or withdraw from) the breakaway.
    pub fn set_in_breakaway(&mut self, in_breakaway: bool) {
        self.in_breakaway = in_breakaway;
    }

    /// Reset per-stage flags and rebuild the deck for the next stage.
    ///
    /// Returns the exhaustion count before and after the rebuild.
    pub fn end_of_stage_reset(&mut self) -> (usize, usize) {
        self.in_breakaway = false;
        self.finished_stage = false;
        self.deck.end_of_stage_rebuild()
    }

    /// Apply the breakaway winner's resolution: two exhaustion cards,
    /// then everything except the discard pile shuffles back into the
    /// deck, and the rider rejoins the main race.
    pub fn resolve_breakaway_win(&mut self) {
        self.deck.add_exhaustion();
        self.deck.add_exhaustion();
        self.deck.shuffle_everything(false);
        self.in_breakaway = false;
    }

    /// Apply the breakaway loser's resolution: everything including the
    /// discard pile shuffles back into the deck, and the rider rejoins
    /// the main race.
    pub fn resolve_breakaway_loss(&mut self) {
        self.deck.shuffle_everything(true);
        self.in_breakaway = false;
    }
}

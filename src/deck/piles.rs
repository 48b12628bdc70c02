//! Deck pile management.
//!
//! A deck owns four piles. Cards move between them but are never
//! created or destroyed except by the explicit exhaustion operations:
//!
//! - **draw pile**: face-down, ordered, front is the top
//! - **recycle pile**: cards waiting to be reshuffled into the draw pile
//! - **discard pile**: played cards in play order, most recent last
//! - **hand**: up to [`HAND_SIZE`] cards drawn and not yet played
//!
//! The hand is only populated by [`Deck::draw`], and only when empty:
//! a hand must be fully resolved before the next draw.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, PelotonError, Result, ShuffleRng};

/// Number of cards a draw puts in the hand when the deck can supply them.
pub const HAND_SIZE: usize = 4;

/// Informational note describing what the last draw had to do.
///
/// Cleared at the start of every draw; rendered for display via
/// `Display`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawNote {
    /// Draw, recycle, and discard could not supply a single card; the
    /// hand received a synthetic exhaustion card.
    DeckExhausted,
    /// Draw and recycle piles together held fewer than a full hand.
    ShortDeck,
    /// The recycle pile was shuffled into the draw pile mid-draw.
    Reshuffled,
}

impl std::fmt::Display for DrawNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DrawNote::DeckExhausted => "No cards left in deck",
            DrawNote::ShortDeck => "4 or fewer cards left in deck",
            DrawNote::Reshuffled => "Deck got shuffled",
        };
        f.write_str(text)
    }
}

/// A rider's deck: draw, recycle, and discard piles plus the hand.
///
/// Owns its own [`ShuffleRng`] (forked from the stage's master RNG) so
/// shuffle outcomes are reproducible per-deck and survive snapshots.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck {
    draw_pile: Vec<Card>,
    recycle_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    hand: SmallVec<[Card; HAND_SIZE]>,
    note: Option<DrawNote>,
    rng: ShuffleRng,
}

impl Deck {
    /// Create a deck from its starting cards, shuffled.
    #[must_use]
    pub fn new(cards: Vec<Card>, mut rng: ShuffleRng) -> Self {
        let mut draw_pile = cards;
        rng.shuffle(&mut draw_pile);
        Self {
            draw_pile,
            recycle_pile: Vec::new(),
            discard_pile: Vec::new(),
            hand: SmallVec::new(),
            note: None,
            rng,
        }
    }

    // === Pile Accessors ===

    /// The draw pile, top first.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    /// The recycle pile.
    #[must_use]
    pub fn recycle_pile(&self) -> &[Card] {
        &self.recycle_pile
    }

    /// The discard pile in play order, most recent last.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// The hand.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Whether the hand is empty (fully resolved).
    #[must_use]
    pub fn is_hand_empty(&self) -> bool {
        self.hand.is_empty()
    }

    /// Note left by the last draw, if it had anything to report.
    #[must_use]
    pub fn note(&self) -> Option<DrawNote> {
        self.note
    }

    /// Total cards across all piles and the hand.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.recycle_pile.len() + self.discard_pile.len() + self.hand.len()
    }

    /// Number of exhaustion cards across all piles and the hand.
    #[must_use]
    pub fn exhaustion_count(&self) -> usize {
        self.draw_pile
            .iter()
            .chain(&self.recycle_pile)
            .chain(&self.discard_pile)
            .chain(&self.hand)
            .filter(|c| c.is_exhaustion())
            .count()
    }

    // === Mutations ===

    /// Add an exhaustion card to the recycle pile.
    pub fn add_exhaustion(&mut self) {
        self.recycle_pile.push(Card::exhaustion());
    }

    /// Move the recycle pile into the draw pile and shuffle.
    ///
    /// Only called when the draw pile is exhausted mid-draw, so the
    /// prior draw order is irrelevant.
    fn reshuffle_recycle(&mut self) {
        self.draw_pile = std::mem::take(&mut self.recycle_pile);
        self.rng.shuffle(&mut self.draw_pile);
    }

    /// Draw a hand of up to [`HAND_SIZE`] cards.
    ///
    /// No-op if the hand is not empty, so callers unsure of current
    /// state can re-invoke safely. In priority order:
    ///
    /// 1. Draw pile has a full hand: take the top four.
    /// 2. Draw and recycle piles are both empty: the hand becomes a
    ///    single synthetic exhaustion card.
    /// 3. Draw and recycle piles together hold fewer than a full hand:
    ///    take everything from both.
    /// 4. Otherwise: take the rest of the draw pile, reshuffle the
    ///    recycle pile into it, and top the hand up.
    pub fn draw(&mut self) {
        if !self.hand.is_empty() {
            return;
        }
        self.note = None;

        if self.draw_pile.len() >= HAND_SIZE {
            self.hand.extend(self.draw_pile.drain(..HAND_SIZE));
        } else if self.draw_pile.is_empty() && self.recycle_pile.is_empty() {
            self.note = Some(DrawNote::DeckExhausted);
            self.hand.push(Card::exhaustion());
        } else if self.draw_pile.len() + self.recycle_pile.len() < HAND_SIZE {
            self.note = Some(DrawNote::ShortDeck);
            self.hand.extend(self.draw_pile.drain(..));
            self.hand.extend(self.recycle_pile.drain(..));
        } else {
            self.note = Some(DrawNote::Reshuffled);
            self.hand.extend(self.draw_pile.drain(..));
            self.reshuffle_recycle();
            while self.hand.len() < HAND_SIZE && !self.draw_pile.is_empty() {
                self.hand.push(self.draw_pile.remove(0));
            }
        }
    }

    /// Play a card from the hand.
    ///
    /// The played card goes to the discard pile; every other card still
    /// in the hand goes to the recycle pile, leaving the hand empty.
    ///
    /// Returns [`PelotonError::CardNotInHand`] if the card is absent.
    pub fn play(&mut self, card: &Card) -> Result<()> {
        let pos = self
            .hand
            .iter()
            .position(|c| c == card)
            .ok_or_else(|| PelotonError::CardNotInHand(card.clone()))?;

        let played = self.hand.remove(pos);
        self.discard_pile.push(played);
        self.recycle_pile.extend(self.hand.drain(..));
        Ok(())
    }

    /// Played cards, most recent first.
    pub fn last_cards_played(&self) -> impl Iterator<Item = &Card> {
        self.discard_pile.iter().rev()
    }

    /// The most recently played card.
    #[must_use]
    pub fn last_played(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// Opponent-visible deck composition: draw and recycle piles,
    /// sorted. Excludes the hand and discard pile.
    #[must_use]
    pub fn full_deck_list(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .draw_pile
            .iter()
            .chain(&self.recycle_pile)
            .cloned()
            .collect();
        cards.sort();
        cards
    }

    /// Merge the recycle pile and hand (and optionally the discard
    /// pile) into the draw pile, then shuffle.
    ///
    /// Used for breakaway win/loss resolution.
    pub fn shuffle_everything(&mut self, include_discard: bool) {
        self.draw_pile.append(&mut self.recycle_pile);
        self.draw_pile.extend(self.hand.drain(..));
        if include_discard {
            self.draw_pile.append(&mut self.discard_pile);
        }
        self.rng.shuffle(&mut self.draw_pile);
    }

    /// Rebuild the deck for the next stage.
    ///
    /// Exhaustion cards in the discard pile do not carry over. Of the
    /// `n` remaining exhaustion cards, `ceil(n/2)` are kept, so fatigue
    /// decays toward zero every stage. Returns the exhaustion count
    /// before and after.
    pub fn end_of_stage_rebuild(&mut self) -> (usize, usize) {
        self.note = None;
        self.discard_pile.retain(|c| !c.is_exhaustion());
        self.shuffle_everything(true);

        let before = self
            .draw_pile
            .iter()
            .filter(|c| c.is_exhaustion())
            .count();
        let after = (before + 1) / 2;

        let mut surplus = before - after;
        self.draw_pile.retain(|c| {
            if surplus > 0 && c.is_exhaustion() {
                surplus -= 1;
                false
            } else {
                true
            }
        });
        self.rng.shuffle(&mut self.draw_pile);

        (before, after)
    }

    /// Construct a deck with explicit pile contents, for tests that
    /// need a deck mid-lifecycle.
    #[cfg(test)]
    pub(crate) fn with_piles(
        draw_pile: Vec<Card>,
        recycle_pile: Vec<Card>,
        discard_pile: Vec<Card>,
        rng: ShuffleRng,
    ) -> Self {
        Self {
            draw_pile,
            recycle_pile,
            discard_pile,
            hand: SmallVec::new(),
            note: None,
            rng,
        }
    }
}

//! Plain-text phase summaries.
//!
//! Everything here is built from engine queries alone; the functions
//! read stage state and format it, mutating nothing. The presentation
//! layer takes these strings as-is or re-derives its own view from the
//! same accessors.
//!
//! Output is deterministic: teams appear in name order, riders in role
//! order, and pile contents are sorted.

use std::fmt::Write;

use crate::core::Card;
use crate::race::{CarryOverReport, Rider, Stage, Team};

/// Formats phase summaries for a stage.
///
/// With `keep_deck_secret` set, draw-pile contents are withheld from
/// the summaries so opponents only learn what the rules entitle them
/// to: hands, recycle piles, and played cards.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reporter {
    keep_deck_secret: bool,
}

impl Reporter {
    /// A reporter that lists full deck contents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that withholds draw-pile contents.
    #[must_use]
    pub fn secret() -> Self {
        Self {
            keep_deck_secret: true,
        }
    }

    /// Summary of the last energy phase: per racing rider, the hand
    /// drawn, remaining piles, and any note the draw left behind.
    #[must_use]
    pub fn energy_phase(&self, stage: &Stage) -> String {
        let mut out = format!("Turn {} - Energy Phase\n\n", stage.turn_number());
        self.energy_lines(&mut out, stage, false);
        out
    }

    /// Summary of a breakaway energy phase: only nominated riders.
    #[must_use]
    pub fn breakaway_energy_phase(&self, stage: &Stage) -> String {
        let mut out = format!(
            "Breakaway Turn {} - Energy Phase\n\n",
            stage.bid_number()
        );
        self.energy_lines(&mut out, stage, true);
        out
    }

    /// Summary of the last movement phase: per racing rider, the card
    /// played and the opponent-visible deck list.
    #[must_use]
    pub fn movement_phase(&self, stage: &Stage) -> String {
        let mut out = format!("Turn {} - Movement Phase\n\n", stage.turn_number());
        self.movement_lines(&mut out, stage, false);
        out
    }

    /// Summary of a breakaway bid round.
    ///
    /// The first round shows each nominated rider's bid; the second
    /// shows the new bid plus the two-round sum in brackets. A sum is
    /// only printed when both bids carry numeric values (an exhaustion
    /// bid renders without one).
    #[must_use]
    pub fn breakaway_bid_phase(&self, stage: &Stage) -> String {
        let mut out = format!("Breakaway Turn {} - Bid Phase\n\n", stage.bid_number());
        self.movement_lines(&mut out, stage, true);
        out
    }

    fn energy_lines(&self, out: &mut String, stage: &Stage, breakaway_only: bool) {
        for team in stage.teams_sorted() {
            write_team_header(out, team);
            for rider in team.riders_sorted() {
                if !is_racing(rider, breakaway_only) {
                    continue;
                }
                match rider.deck().note() {
                    Some(note) => {
                        let _ = writeln!(out, "{}: {}", rider.name(), note);
                    }
                    None => {
                        let _ = writeln!(out, "{}:", rider.name());
                    }
                }
                let _ = write!(out, "Hand: {}", join_sorted(rider.deck().hand()));
                if !self.keep_deck_secret {
                    let _ = write!(out, " - Draw: {}", join_sorted(rider.deck().draw_pile()));
                }
                let _ = writeln!(
                    out,
                    " - Recycle: {}",
                    join_sorted(rider.deck().recycle_pile())
                );
                out.push('\n');
            }
        }
    }

    fn movement_lines(&self, out: &mut String, stage: &Stage, breakaway_only: bool) {
        for team in stage.teams_sorted() {
            write_team_header(out, team);
            for rider in team.riders_sorted() {
                if !is_racing(rider, breakaway_only) {
                    continue;
                }
                let _ = writeln!(out, "{}:", rider.name());
                if breakaway_only && stage.bid_number() == 2 {
                    write_second_bid(out, rider);
                } else {
                    let played = match rider.deck().last_played() {
                        Some(card) => card.code().to_string(),
                        None => "None".to_string(),
                    };
                    if breakaway_only || self.keep_deck_secret {
                        let _ = writeln!(out, "Card played: {played}");
                    } else {
                        let _ = writeln!(
                            out,
                            "Card played: {played} - Deck: {}",
                            join(&rider.deck().full_deck_list())
                        );
                    }
                }
            }
            out.push('\n');
        }
    }
}

/// Human-readable carry-over report for a stage transition.
///
/// One `team rider: before -> after` line per rider, in the order the
/// report's entries were produced.
#[must_use]
pub fn carry_over(report: &CarryOverReport) -> String {
    let mut out = format!("Exhaustion cards carried over to {}\n", report.stage_name);
    for entry in &report.entries {
        let _ = writeln!(
            out,
            "{} {}: {} -> {}",
            entry.team, entry.rider, entry.before, entry.after
        );
    }
    out
}

fn is_racing(rider: &Rider, breakaway_only: bool) -> bool {
    !rider.finished_stage() && (!breakaway_only || rider.in_breakaway())
}

fn write_team_header(out: &mut String, team: &Team) {
    let _ = writeln!(out, "{} ({})", team.name(), team.player());
}

/// The second bid line: the new bid plus the two-round sum.
fn write_second_bid(out: &mut String, rider: &Rider) {
    let played: Vec<&Card> = rider.deck().last_cards_played().take(2).collect();
    if played.len() < 2 {
        let _ = writeln!(out, "Card played: None");
        return;
    }
    let second = played[0];
    let first = played[1];
    match (second.numeric_value(), first.numeric_value()) {
        (Some(a), Some(b)) => {
            let _ = writeln!(out, "Card played: {second} [{}]", a + b);
        }
        _ => {
            let _ = writeln!(out, "Card played: {second}");
        }
    }
}

fn join(cards: &[Card]) -> String {
    let codes: Vec<&str> = cards.iter().map(Card::code).collect();
    codes.join(",")
}

fn join_sorted(cards: &[Card]) -> String {
    let mut sorted: Vec<&Card> = cards.iter().collect();
    sorted.sort();
    let codes: Vec<&str> = sorted.iter().map(|c| c.code()).collect();
    codes.join(",")
}

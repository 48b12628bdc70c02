//! Legality predicates.
//!
//! Pure functions computing whether an action is currently permitted,
//! derived entirely from stage and rider state. Nothing here mutates;
//! the presentation layer calls these before invoking the matching
//! stage operation, and the stage operations themselves stay
//! unguarded.

use crate::core::{Result, RoleCode};
use crate::race::{Rider, Stage};

/// Whether every rider's hand is resolved (played or never drawn).
#[must_use]
pub fn all_riders_have_played(stage: &Stage) -> bool {
    stage.riders().all(|r| r.deck().is_hand_empty())
}

/// Whether every breakaway rider's hand is resolved.
#[must_use]
pub fn all_breakaway_riders_have_played(stage: &Stage) -> bool {
    stage
        .riders()
        .filter(|r| r.in_breakaway())
        .all(|r| r.deck().is_hand_empty())
}

/// Whether every team has nominated a rider into the breakaway.
#[must_use]
pub fn all_teams_have_nominated(stage: &Stage) -> bool {
    stage.teams().all(|t| t.has_nominated_rider())
}

/// Whether no team has a rider in the breakaway.
#[must_use]
pub fn no_team_has_nominated(stage: &Stage) -> bool {
    !stage.riders().any(Rider::in_breakaway)
}

/// Whether the main energy phase may run.
///
/// Legal once all hands are resolved, except while a breakaway is in
/// progress: then the second bid round must be complete and every
/// breakaway rider resolved back into the race first.
#[must_use]
pub fn can_perform_energy(stage: &Stage) -> bool {
    if !stage.breakaway_started() {
        all_riders_have_played(stage)
    } else if stage.bid_number() == 2 {
        all_riders_have_played(stage) && no_team_has_nominated(stage)
    } else {
        false
    }
}

/// Whether a breakaway energy phase may run.
///
/// The first bid round requires a stage that has not started racing
/// and a nominated rider from every team; the second requires every
/// first-round bid to be played. There is no third round.
#[must_use]
pub fn can_perform_breakaway(stage: &Stage) -> bool {
    match stage.bid_number() {
        0 => stage.turn_number() == 0 && all_teams_have_nominated(stage),
        1 => all_breakaway_riders_have_played(stage),
        _ => false,
    }
}

/// Whether the named team may still nominate a breakaway rider.
///
/// Nomination is open before any bidding has happened, and each team
/// sends at most one rider.
pub fn can_nominate(stage: &Stage, team_name: &str) -> Result<bool> {
    let team = stage.team(team_name)?;
    Ok(stage.turn_number() == 0 && stage.bid_number() == 0 && !team.has_nominated_rider())
}

/// Whether the given rider's breakaway can be resolved (winner or
/// loser): both bid rounds played out and the rider still flagged.
pub fn can_resolve_breakaway(stage: &Stage, team_name: &str, role: RoleCode) -> Result<bool> {
    let rider = stage.team(team_name)?.rider(role)?;
    Ok(stage.bid_number() == 2
        && all_breakaway_riders_have_played(stage)
        && rider.in_breakaway())
}

/// Whether end-of-turn actions (exhaustion, finish flag) may be chosen
/// for the given rider: the stage is under way, all hands are
/// resolved, and the rider is still racing.
pub fn can_choose_rider_action(stage: &Stage, team_name: &str, role: RoleCode) -> Result<bool> {
    let rider = stage.team(team_name)?.rider(role)?;
    Ok(stage.turn_number() > 0 && all_riders_have_played(stage) && !rider.finished_stage())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::StageBuilder;

    fn two_team_stage() -> Stage {
        StageBuilder::new("Stage 1")
            .seed(42)
            .team("Team Red", "Alice", "#FF0000")
            .team("Team Blue", "Bob", "#0000FF")
            .build()
            .unwrap()
    }

    fn play_out_hands(stage: &mut Stage) {
        let names: Vec<String> = stage.teams().map(|t| t.name().to_string()).collect();
        for name in names {
            let team = stage.team_mut(&name).unwrap();
            let plays: Vec<(RoleCode, crate::core::Card)> = team
                .riders()
                .filter(|r| !r.deck().is_hand_empty())
                .map(|r| (r.role(), r.deck().hand()[0].clone()))
                .collect();
            for (role, card) in plays {
                team.rider_mut(role).unwrap().deck_mut().play(&card).unwrap();
            }
        }
    }

    #[test]
    fn test_energy_legal_at_stage_start() {
        let stage = two_team_stage();
        assert!(can_perform_energy(&stage));
    }

    #[test]
    fn test_energy_illegal_with_unplayed_hands() {
        let mut stage = two_team_stage();
        stage.perform_energy_phase();
        assert!(!can_perform_energy(&stage));

        play_out_hands(&mut stage);
        assert!(can_perform_energy(&stage));
    }

    #[test]
    fn test_breakaway_requires_all_nominations() {
        let mut stage = two_team_stage();
        assert!(!can_perform_breakaway(&stage));

        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_in_breakaway(true);
        assert!(!can_perform_breakaway(&stage));

        stage
            .team_mut("Team Blue")
            .unwrap()
            .rider_mut(RoleCode::new('S'))
            .unwrap()
            .set_in_breakaway(true);
        assert!(can_perform_breakaway(&stage));
    }

    #[test]
    fn test_breakaway_illegal_once_racing_started() {
        let mut stage = two_team_stage();
        stage.perform_energy_phase();
        play_out_hands(&mut stage);

        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_in_breakaway(true);
        stage
            .team_mut("Team Blue")
            .unwrap()
            .rider_mut(RoleCode::new('S'))
            .unwrap()
            .set_in_breakaway(true);

        assert!(!can_perform_breakaway(&stage));
    }

    #[test]
    fn test_breakaway_second_round_needs_bids_played() {
        let mut stage = two_team_stage();
        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_in_breakaway(true);
        stage
            .team_mut("Team Blue")
            .unwrap()
            .rider_mut(RoleCode::new('S'))
            .unwrap()
            .set_in_breakaway(true);

        stage.perform_breakaway_energy_phase();
        assert_eq!(stage.bid_number(), 1);
        assert!(!can_perform_breakaway(&stage));

        // Play the two breakaway bids
        let bid = stage
            .team("Team Red")
            .unwrap()
            .rider(RoleCode::new('R'))
            .unwrap()
            .deck()
            .hand()[0]
            .clone();
        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .deck_mut()
            .play(&bid)
            .unwrap();
        let bid = stage
            .team("Team Blue")
            .unwrap()
            .rider(RoleCode::new('S'))
            .unwrap()
            .deck()
            .hand()[0]
            .clone();
        stage
            .team_mut("Team Blue")
            .unwrap()
            .rider_mut(RoleCode::new('S'))
            .unwrap()
            .deck_mut()
            .play(&bid)
            .unwrap();

        assert!(can_perform_breakaway(&stage));
    }

    #[test]
    fn test_no_third_bid_round() {
        let mut stage = two_team_stage();
        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_in_breakaway(true);
        stage.perform_breakaway_energy_phase();
        stage.perform_breakaway_energy_phase();
        assert_eq!(stage.bid_number(), 2);

        assert!(!can_perform_breakaway(&stage));
    }

    #[test]
    fn test_energy_gated_until_breakaway_resolved() {
        let mut stage = two_team_stage();
        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_in_breakaway(true);

        stage.perform_breakaway_energy_phase();
        assert!(!can_perform_energy(&stage));

        play_out_hands(&mut stage);
        // Bid round 1 complete but the breakaway is still running
        assert!(!can_perform_energy(&stage));

        stage.perform_breakaway_energy_phase();
        play_out_hands(&mut stage);
        // Bids done, but the rider is still flagged into the breakaway
        assert!(!can_perform_energy(&stage));

        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .resolve_breakaway_win();
        assert!(can_perform_energy(&stage));
    }

    #[test]
    fn test_can_nominate() {
        let mut stage = two_team_stage();
        assert!(can_nominate(&stage, "Team Red").unwrap());

        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_in_breakaway(true);
        assert!(!can_nominate(&stage, "Team Red").unwrap());
        assert!(can_nominate(&stage, "Team Blue").unwrap());

        assert!(can_nominate(&stage, "Team Green").is_err());
    }

    #[test]
    fn test_can_resolve_breakaway() {
        let mut stage = two_team_stage();
        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_in_breakaway(true);

        stage.perform_breakaway_energy_phase();
        play_out_hands(&mut stage);
        assert!(!can_resolve_breakaway(&stage, "Team Red", RoleCode::new('R')).unwrap());

        stage.perform_breakaway_energy_phase();
        play_out_hands(&mut stage);
        assert!(can_resolve_breakaway(&stage, "Team Red", RoleCode::new('R')).unwrap());
        assert!(!can_resolve_breakaway(&stage, "Team Red", RoleCode::new('S')).unwrap());
    }

    #[test]
    fn test_can_choose_rider_action() {
        let mut stage = two_team_stage();
        assert!(!can_choose_rider_action(&stage, "Team Red", RoleCode::new('R')).unwrap());

        stage.perform_energy_phase();
        assert!(!can_choose_rider_action(&stage, "Team Red", RoleCode::new('R')).unwrap());

        play_out_hands(&mut stage);
        assert!(can_choose_rider_action(&stage, "Team Red", RoleCode::new('R')).unwrap());

        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_finished_stage(true);
        assert!(!can_choose_rider_action(&stage, "Team Red", RoleCode::new('R')).unwrap());
    }
}

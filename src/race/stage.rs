//! Stages: the turn/bid state machine and end-of-stage carry-over.
//!
//! A stage owns every team and the counters that drive the phase
//! cycle. Phases never raise errors under normal sequencing; whether a
//! phase may run right now is the query layer's concern, not enforced
//! here.
//!
//! ## Phase cycle
//!
//! 1. **Energy**: [`Stage::perform_energy_phase`] draws a hand for
//!    every rider still racing.
//! 2. **Movement**: plays accumulate through the team/rider operations;
//!    the stage only reports on them.
//! 3. **End of turn**: exhaustion adds arrive via
//!    [`Team::add_exhaustion_shorthand`].
//!
//! The optional breakaway sub-cycle interleaves before turn 1: riders
//! are nominated, then [`Stage::perform_breakaway_energy_phase`] runs
//! two bid rounds; an external resolver settles winner and loser via
//! the rider resolution operations.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{PelotonError, Result, ShuffleRng};

use super::rider::Rider;
use super::team::Team;

/// A stage of the race: all teams plus turn and bid counters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stage {
    name: String,
    teams: FxHashMap<String, Team>,
    turn_number: u32,
    bid_number: u8,
    breakaway_started: bool,
    rng: ShuffleRng,
}

impl Stage {
    /// Create an empty stage.
    ///
    /// The seed drives every deck shuffle in the stage: each deck forks
    /// its own stream from this master RNG as teams are added.
    #[must_use]
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            teams: FxHashMap::default(),
            turn_number: 0,
            bid_number: 0,
            breakaway_started: false,
            rng: ShuffleRng::new(seed),
        }
    }

    /// The stage's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Turns played so far; 0 before the first energy phase.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Breakaway bid round: 0 before bidding, then 1 and 2.
    #[must_use]
    pub fn bid_number(&self) -> u8 {
        self.bid_number
    }

    /// Whether the most recent energy phase was a breakaway one.
    #[must_use]
    pub fn breakaway_started(&self) -> bool {
        self.breakaway_started
    }

    /// Add a team with the standard Rouleur/Sprinteur roster.
    ///
    /// Returns [`PelotonError::DuplicateTeam`] if the name is taken.
    pub fn add_team(
        &mut self,
        name: impl Into<String>,
        player: impl Into<String>,
        colour: impl Into<String>,
    ) -> Result<()> {
        let team = Team::with_standard_riders(name, player, colour, &mut self.rng);
        self.insert_team(team)
    }

    /// Add a fully built team (custom roster).
    pub fn insert_team(&mut self, team: Team) -> Result<()> {
        if self.teams.contains_key(team.name()) {
            return Err(PelotonError::DuplicateTeam(team.name().to_string()));
        }
        self.teams.insert(team.name().to_string(), team);
        Ok(())
    }

    /// Fork a deck RNG from the stage's master stream.
    ///
    /// Use when building custom riders so their shuffles stay on the
    /// stage's deterministic seed.
    pub fn fork_rng(&mut self) -> ShuffleRng {
        self.rng.fork()
    }

    /// Look up a team by name.
    pub fn team(&self, name: &str) -> Result<&Team> {
        self.teams
            .get(name)
            .ok_or_else(|| PelotonError::UnknownTeam(name.to_string()))
    }

    /// Look up a team by name, mutably.
    pub fn team_mut(&mut self, name: &str) -> Result<&mut Team> {
        self.teams
            .get_mut(name)
            .ok_or_else(|| PelotonError::UnknownTeam(name.to_string()))
    }

    /// Iterate over teams in arbitrary order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    /// Teams sorted by name, for deterministic output.
    #[must_use]
    pub fn teams_sorted(&self) -> Vec<&Team> {
        let mut teams: Vec<&Team> = self.teams.values().collect();
        teams.sort_by(|a, b| a.name().cmp(b.name()));
        teams
    }

    /// Iterate over every rider in the stage.
    pub fn riders(&self) -> impl Iterator<Item = &Rider> {
        self.teams.values().flat_map(Team::riders)
    }

    /// Run the energy phase: a new turn begins and every rider who has
    /// not finished the stage draws a hand.
    ///
    /// Draws are no-ops for riders whose hands are still unresolved;
    /// callers gate re-invocation with the query layer.
    pub fn perform_energy_phase(&mut self) {
        self.breakaway_started = false;
        self.turn_number += 1;
        for team in self.teams.values_mut() {
            for rider in team.riders_mut() {
                if !rider.finished_stage() {
                    rider.deck_mut().draw();
                }
            }
        }
    }

    /// Run a breakaway energy phase: the bid round advances and every
    /// nominated rider draws a hand.
    pub fn perform_breakaway_energy_phase(&mut self) {
        self.breakaway_started = true;
        self.bid_number += 1;
        for team in self.teams.values_mut() {
            for rider in team.riders_mut() {
                if rider.in_breakaway() {
                    rider.deck_mut().draw();
                }
            }
        }
    }

    /// Consume this stage and produce the next one.
    ///
    /// Teams and riders carry over; per-stage flags reset, every deck
    /// is rebuilt (exhaustion decays by the keep-`ceil(n/2)` rule), and
    /// the counters start fresh. The returned report lists each rider's
    /// exhaustion count before and after the rebuild.
    pub fn advance(mut self, next_name: impl Into<String>) -> (Stage, CarryOverReport) {
        let next_name = next_name.into();

        let mut entries = Vec::new();
        let mut team_names: Vec<String> = self.teams.keys().cloned().collect();
        team_names.sort();
        for team_name in &team_names {
            if let Some(team) = self.teams.get_mut(team_name) {
                let mut riders: Vec<&mut Rider> = team.riders_mut().collect();
                riders.sort_by_key(|r| r.role());
                for rider in riders {
                    let (before, after) = rider.end_of_stage_reset();
                    entries.push(CarryOverEntry {
                        team: team_name.clone(),
                        rider: rider.name().to_string(),
                        before,
                        after,
                    });
                }
            }
        }

        let report = CarryOverReport {
            stage_name: next_name.clone(),
            entries,
        };

        self.name = next_name;
        self.turn_number = 0;
        self.bid_number = 0;
        self.breakaway_started = false;

        (self, report)
    }
}

/// Per-rider exhaustion carry-over produced by [`Stage::advance`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryOverEntry {
    /// Team name.
    pub team: String,
    /// Rider name.
    pub rider: String,
    /// Exhaustion cards before the rebuild.
    pub before: usize,
    /// Exhaustion cards after the rebuild.
    pub after: usize,
}

/// Carry-over data for a stage transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryOverReport {
    /// Name of the stage the cards carry over to.
    pub stage_name: String,
    /// One entry per rider, teams in name order, riders in role order.
    pub entries: Vec<CarryOverEntry>,
}

/// Builder for a stage with its teams.
///
/// ```
/// use peloton::race::StageBuilder;
///
/// let stage = StageBuilder::new("Stage 1")
///     .seed(42)
///     .team("Team Red", "Alice", "#FF0000")
///     .team("Team Blue", "Bob", "#0000FF")
///     .build()
///     .unwrap();
///
/// assert_eq!(stage.teams().count(), 2);
/// assert_eq!(stage.turn_number(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct StageBuilder {
    name: String,
    seed: u64,
    teams: Vec<(String, String, String)>,
}

impl StageBuilder {
    /// Start building a stage with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seed: 0,
            teams: Vec::new(),
        }
    }

    /// Set the master shuffle seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Add a team with the standard roster.
    #[must_use]
    pub fn team(
        mut self,
        name: impl Into<String>,
        player: impl Into<String>,
        colour: impl Into<String>,
    ) -> Self {
        self.teams
            .push((name.into(), player.into(), colour.into()));
        self
    }

    /// Build the stage.
    ///
    /// Returns [`PelotonError::DuplicateTeam`] if two teams share a name.
    pub fn build(self) -> Result<Stage> {
        let mut stage = Stage::new(self.name, self.seed);
        for (name, player, colour) in self.teams {
            stage.add_team(name, player, colour)?;
        }
        Ok(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoleCode;
    use crate::deck::HAND_SIZE;

    fn two_team_stage() -> Stage {
        StageBuilder::new("Stage 1")
            .seed(42)
            .team("Team Red", "Alice", "#FF0000")
            .team("Team Blue", "Bob", "#0000FF")
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_stage_counters() {
        let stage = two_team_stage();
        assert_eq!(stage.turn_number(), 0);
        assert_eq!(stage.bid_number(), 0);
        assert!(!stage.breakaway_started());
    }

    #[test]
    fn test_duplicate_team() {
        let mut stage = two_team_stage();
        let err = stage.add_team("Team Red", "Carol", "#00FF00").unwrap_err();
        assert_eq!(err, PelotonError::DuplicateTeam("Team Red".to_string()));
    }

    #[test]
    fn test_unknown_team() {
        let stage = two_team_stage();
        let err = stage.team("Team Green").unwrap_err();
        assert_eq!(err, PelotonError::UnknownTeam("Team Green".to_string()));
    }

    #[test]
    fn test_energy_phase_draws_for_everyone() {
        let mut stage = two_team_stage();

        stage.perform_energy_phase();

        assert_eq!(stage.turn_number(), 1);
        for rider in stage.riders() {
            assert_eq!(rider.deck().hand().len(), HAND_SIZE);
        }
    }

    #[test]
    fn test_energy_phase_skips_finished_riders() {
        let mut stage = two_team_stage();
        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_finished_stage(true);

        stage.perform_energy_phase();

        let finished = stage
            .team("Team Red")
            .unwrap()
            .rider(RoleCode::new('R'))
            .unwrap();
        assert!(finished.deck().is_hand_empty());

        let racing = stage
            .team("Team Red")
            .unwrap()
            .rider(RoleCode::new('S'))
            .unwrap();
        assert_eq!(racing.deck().hand().len(), HAND_SIZE);
    }

    #[test]
    fn test_energy_phase_clears_breakaway_flag() {
        let mut stage = two_team_stage();
        stage.perform_breakaway_energy_phase();
        assert!(stage.breakaway_started());

        stage.perform_energy_phase();
        assert!(!stage.breakaway_started());
    }

    #[test]
    fn test_breakaway_energy_phase_draws_only_nominated() {
        let mut stage = two_team_stage();
        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_in_breakaway(true);

        stage.perform_breakaway_energy_phase();

        assert!(stage.breakaway_started());
        assert_eq!(stage.bid_number(), 1);
        assert_eq!(stage.turn_number(), 0);

        for team in stage.teams() {
            for rider in team.riders() {
                if rider.in_breakaway() {
                    assert_eq!(rider.deck().hand().len(), HAND_SIZE);
                } else {
                    assert!(rider.deck().is_hand_empty());
                }
            }
        }
    }

    #[test]
    fn test_advance_resets_and_reports() {
        let mut stage = two_team_stage();
        stage.perform_energy_phase();
        stage
            .team_mut("Team Red")
            .unwrap()
            .add_exhaustion_shorthand("r r r r r")
            .unwrap();
        stage
            .team_mut("Team Red")
            .unwrap()
            .rider_mut(RoleCode::new('R'))
            .unwrap()
            .set_in_breakaway(true);

        let (next, report) = stage.advance("Stage 2");

        assert_eq!(next.name(), "Stage 2");
        assert_eq!(next.turn_number(), 0);
        assert_eq!(next.bid_number(), 0);
        assert!(!next.breakaway_started());

        for rider in next.riders() {
            assert!(!rider.in_breakaway());
            assert!(!rider.finished_stage());
            assert!(rider.deck().is_hand_empty());
        }

        assert_eq!(report.stage_name, "Stage 2");
        // Teams in name order, riders in role order
        let labels: Vec<(&str, &str)> = report
            .entries
            .iter()
            .map(|e| (e.team.as_str(), e.rider.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Team Blue", "Rouleur"),
                ("Team Blue", "Sprinteur"),
                ("Team Red", "Rouleur"),
                ("Team Red", "Sprinteur"),
            ]
        );

        let red_rouleur = &report.entries[2];
        assert_eq!((red_rouleur.before, red_rouleur.after), (5, 3));
    }

    #[test]
    fn test_advance_keeps_team_count() {
        let stage = two_team_stage();
        let (next, _) = stage.advance("Stage 2");
        assert_eq!(next.teams().count(), 2);
    }

    #[test]
    fn test_custom_roster_via_fork_rng() {
        use crate::core::Card;

        let mut stage = Stage::new("Crit", 7);
        let rng = stage.fork_rng();
        let mut team = Team::new("Solo", "Dana", "#123456");
        team.add_rider(Rider::new(
            "Puncheur",
            RoleCode::new('P'),
            vec![Card::new("4"), Card::new("5")],
            rng,
        ))
        .unwrap();
        stage.insert_team(team).unwrap();

        let rider = stage
            .team("Solo")
            .unwrap()
            .rider(RoleCode::new('P'))
            .unwrap();
        assert_eq!(rider.deck().total_cards(), 2);
    }
}

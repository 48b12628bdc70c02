//! Teams: rider rosters and bulk shorthand actions.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    parse_exhaust_commands, parse_play_commands, Command, PelotonError, Result, RoleCode,
    ShuffleRng,
};

use super::rider::Rider;

/// A team: a named roster of riders keyed by role code.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    name: String,
    player: String,
    colour: String,
    riders: FxHashMap<RoleCode, Rider>,
}

impl Team {
    /// Create a team with an empty roster.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        player: impl Into<String>,
        colour: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            player: player.into(),
            colour: colour.into(),
            riders: FxHashMap::default(),
        }
    }

    /// Create a team with the standard Rouleur/Sprinteur roster, each
    /// deck on its own fork of the given RNG.
    #[must_use]
    pub fn with_standard_riders(
        name: impl Into<String>,
        player: impl Into<String>,
        colour: impl Into<String>,
        rng: &mut ShuffleRng,
    ) -> Self {
        let mut team = Self::new(name, player, colour);
        for rider in [Rider::rouleur(rng.fork()), Rider::sprinteur(rng.fork())] {
            team.riders.insert(rider.role(), rider);
        }
        team
    }

    /// The team's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The controlling player.
    #[must_use]
    pub fn player(&self) -> &str {
        &self.player
    }

    /// The team's display colour.
    #[must_use]
    pub fn colour(&self) -> &str {
        &self.colour
    }

    /// Add a rider to the roster.
    ///
    /// Returns [`PelotonError::DuplicateRole`] if the role code is taken.
    pub fn add_rider(&mut self, rider: Rider) -> Result<()> {
        if self.riders.contains_key(&rider.role()) {
            return Err(PelotonError::DuplicateRole(rider.role()));
        }
        self.riders.insert(rider.role(), rider);
        Ok(())
    }

    /// Look up a rider by role code.
    pub fn rider(&self, role: RoleCode) -> Result<&Rider> {
        self.riders
            .get(&role)
            .ok_or(PelotonError::UnknownRole(role))
    }

    /// Look up a rider by role code, mutably.
    pub fn rider_mut(&mut self, role: RoleCode) -> Result<&mut Rider> {
        self.riders
            .get_mut(&role)
            .ok_or(PelotonError::UnknownRole(role))
    }

    /// Iterate over the roster in arbitrary order.
    pub fn riders(&self) -> impl Iterator<Item = &Rider> {
        self.riders.values()
    }

    /// Iterate over the roster in arbitrary order, mutably.
    pub fn riders_mut(&mut self) -> impl Iterator<Item = &mut Rider> {
        self.riders.values_mut()
    }

    /// The roster sorted by role code, for deterministic output.
    #[must_use]
    pub fn riders_sorted(&self) -> Vec<&Rider> {
        let mut riders: Vec<&Rider> = self.riders.values().collect();
        riders.sort_by_key(|r| r.role());
        riders
    }

    /// Whether any rider on this team is nominated into the breakaway.
    #[must_use]
    pub fn has_nominated_rider(&self) -> bool {
        self.riders.values().any(Rider::in_breakaway)
    }

    /// Play cards from a shorthand string, e.g. `"r5 s3"`.
    ///
    /// The whole input is parsed and every role code checked against
    /// the roster before any card moves, so a malformed command leaves
    /// the team untouched. A `CardNotInHand` can still surface
    /// mid-dispatch; plays before the failing one stand.
    pub fn play_shorthand(&mut self, input: &str) -> Result<()> {
        let commands = parse_play_commands(input)?;
        self.dispatch(commands)
    }

    /// Add exhaustion cards from a shorthand string, e.g. `"r s"`.
    ///
    /// Validated the same way as [`Team::play_shorthand`]; exhaustion
    /// adds cannot fail after validation.
    pub fn add_exhaustion_shorthand(&mut self, input: &str) -> Result<()> {
        let commands = parse_exhaust_commands(input)?;
        self.dispatch(commands)
    }

    fn dispatch(&mut self, commands: Vec<Command>) -> Result<()> {
        for command in &commands {
            if !self.riders.contains_key(&command.role()) {
                return Err(PelotonError::UnknownRole(command.role()));
            }
        }
        for command in commands {
            match command {
                Command::Play { role, card } => {
                    self.rider_mut(role)?.deck_mut().play(&card)?;
                }
                Command::Exhaust { role } => {
                    self.rider_mut(role)?.deck_mut().add_exhaustion();
                }
            }
        }
        Ok(())
    }
}

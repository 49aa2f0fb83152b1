use crate::domain::player::Player;
use crate::utils::error::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of players in a playing XI.
pub const XI: usize = 11;

/// Index of a player within a playing XI. Which team's XI is meant is
/// contextual: batting records point into the batting XI, bowling and
/// fielding records into the bowling XI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub usize);

/// A playing XI in batting order, with the specialist role indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    name: String,
    players: Vec<Player>,
    captain: usize,
    wicket_keeper: usize,
    opening_bowlers: (usize, usize),
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        players: Vec<Player>,
        captain: usize,
        wicket_keeper: usize,
        opening_bowlers: (usize, usize),
    ) -> Result<Self> {
        let team = Self {
            name: name.into(),
            players,
            captain,
            wicket_keeper,
            opening_bowlers,
        };
        team.validate()?;
        Ok(team)
    }

    /// Role indices must point into the XI and the opening bowlers must be
    /// two different players. Deserialized teams are validated with this
    /// before they reach the engine.
    pub fn validate(&self) -> Result<()> {
        if self.players.len() != XI {
            return Err(MatchError::Validation {
                message: format!(
                    "team {} has {} players, a playing XI needs {}",
                    self.name,
                    self.players.len(),
                    XI
                ),
            });
        }
        for (role, idx) in [
            ("captain", self.captain),
            ("wicket_keeper", self.wicket_keeper),
            ("opening bowler", self.opening_bowlers.0),
            ("opening bowler", self.opening_bowlers.1),
        ] {
            if idx >= XI {
                return Err(MatchError::Validation {
                    message: format!("team {}: {role} index {idx} outside the XI", self.name),
                });
            }
        }
        if self.opening_bowlers.0 == self.opening_bowlers.1 {
            return Err(MatchError::Validation {
                message: format!(
                    "team {}: opening bowlers must be two different players",
                    self.name
                ),
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, idx: usize) -> &Player {
        &self.players[idx]
    }

    pub fn captain(&self) -> &Player {
        &self.players[self.captain]
    }

    pub fn captain_idx(&self) -> usize {
        self.captain
    }

    pub fn wicket_keeper(&self) -> &Player {
        &self.players[self.wicket_keeper]
    }

    pub fn wicket_keeper_idx(&self) -> usize {
        self.wicket_keeper
    }

    /// Opening bowlers by end: `false` for the first over of the match,
    /// `true` for the second.
    pub fn opening_bowler(&self, second_end: bool) -> usize {
        if second_end {
            self.opening_bowlers.1
        } else {
            self.opening_bowlers.0
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for (i, player) in self.players.iter().enumerate() {
            write!(f, "{}. {}", i + 1, player.full_initials())?;
            if i == self.captain && i == self.wicket_keeper {
                write!(f, " (c, wk)")?;
            } else if i == self.captain {
                write!(f, " (c)")?;
            } else if i == self.wicket_keeper {
                write!(f, " (wk)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::{Arm, BowlType};
    use crate::domain::player::Stats;

    fn batter_stats() -> Stats {
        Stats {
            innings: 50,
            bat_avg: 42.0,
            bat_sr: 52.0,
            balls_bowled: 120,
            bowl_avg: 60.0,
            bowl_sr: 90.0,
            bowl_econ: 4.0,
            bat_arm: Arm::Right,
            bowl_arm: Arm::Right,
            bowl_type: BowlType::Medium,
        }
    }

    fn eleven() -> Vec<Player> {
        (0..11)
            .map(|i| Player::new(format!("First{i}"), format!("Last{i}"), "F", batter_stats()))
            .collect()
    }

    #[test]
    fn valid_team_constructs() {
        let team = Team::new("Australia", eleven(), 0, 6, (9, 10)).unwrap();
        assert_eq!(team.name(), "Australia");
        assert_eq!(team.captain().last_name(), "Last0");
        assert_eq!(team.wicket_keeper().last_name(), "Last6");
        assert_eq!(team.opening_bowler(false), 9);
        assert_eq!(team.opening_bowler(true), 10);
    }

    #[test]
    fn wrong_squad_size_rejected() {
        let mut players = eleven();
        players.pop();
        assert!(Team::new("Australia", players, 0, 6, (9, 10)).is_err());
    }

    #[test]
    fn role_index_out_of_range_rejected() {
        assert!(Team::new("Australia", eleven(), 11, 6, (9, 10)).is_err());
        assert!(Team::new("Australia", eleven(), 0, 6, (9, 11)).is_err());
    }

    #[test]
    fn duplicate_opening_bowlers_rejected() {
        assert!(Team::new("Australia", eleven(), 0, 6, (9, 9)).is_err());
    }

    #[test]
    fn xi_listing_marks_roles() {
        let team = Team::new("Australia", eleven(), 0, 0, (9, 10)).unwrap();
        let listing = team.to_string();
        assert!(listing.starts_with("Australia\n"));
        assert!(listing.contains("1. F Last0 (c, wk)"));
        assert!(listing.contains("11. F Last10"));
    }
}

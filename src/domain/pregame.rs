use crate::domain::enums::TossChoice;
use crate::domain::team::Team;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much the pitch helps seam and spin bowling. 1.0 is neutral;
/// above 1.0 favors the bowler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchFactors {
    pub seam: f64,
    pub spin: f64,
}

impl Default for PitchFactors {
    fn default() -> Self {
        Self {
            seam: 1.0,
            spin: 1.0,
        }
    }
}

/// A ground and its pitch conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub pitch_factors: PitchFactors,
}

/// Everything fixed before the first ball: the two sides and the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pregame {
    pub home_team: Team,
    pub away_team: Team,
    pub venue: Venue,
}

/// Result of the coin toss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toss {
    /// Name of the team that won the toss.
    pub winner: String,
    pub choice: TossChoice,
}

impl fmt::Display for Toss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} won the toss and elected to {}",
            self.winner, self.choice
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_pitch_default() {
        let pitch = PitchFactors::default();
        assert_eq!(pitch.seam, 1.0);
        assert_eq!(pitch.spin, 1.0);
    }

    #[test]
    fn toss_announcement() {
        let toss = Toss {
            winner: "England".to_string(),
            choice: TossChoice::Field,
        };
        assert_eq!(toss.to_string(), "England won the toss and elected to field");
    }
}

use crate::utils::error::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The encoded result of a single delivery.
///
/// The string forms are the scorebook codes: "0".."6" and "W" for
/// outcomes off the bat, and a run count with a suffix for extras
/// ("3b", "1lb", "2nb", "1w"). For no-balls and wides the count is the
/// total conceded including the one-run penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Outcome {
    /// Runs off the bat. Five is a boundary four plus an overthrow.
    Runs(u8),
    Wicket,
    Bye(u8),
    LegBye(u8),
    NoBall(u8),
    Wide(u8),
}

impl Outcome {
    /// Wides and no-balls must be re-bowled.
    pub fn is_legal(&self) -> bool {
        !matches!(self, Outcome::NoBall(_) | Outcome::Wide(_))
    }

    /// Runs added to the team total.
    pub fn team_runs(&self) -> u32 {
        match self {
            Outcome::Wicket => 0,
            Outcome::Runs(n)
            | Outcome::Bye(n)
            | Outcome::LegBye(n)
            | Outcome::NoBall(n)
            | Outcome::Wide(n) => u32::from(*n),
        }
    }

    /// Runs credited to the batter: everything off the bat, plus a
    /// no-ball's runs without the penalty.
    pub fn batter_runs(&self) -> u32 {
        match self {
            Outcome::Runs(n) => u32::from(*n),
            Outcome::NoBall(n) => u32::from(n.saturating_sub(1)),
            _ => 0,
        }
    }

    /// Runs charged against the bowler. Byes and leg-byes are the
    /// fielding side's fault, not the bowler's.
    pub fn bowler_runs(&self) -> u32 {
        match self {
            Outcome::Runs(n) | Outcome::NoBall(n) | Outcome::Wide(n) => u32::from(*n),
            _ => 0,
        }
    }

    /// Whether the striker faced a ball. Wides never reach the bat.
    pub fn counts_ball_faced(&self) -> bool {
        !matches!(self, Outcome::Wide(_))
    }

    /// Whether the batters end the delivery at opposite ends. Physical
    /// runs decide it: a boundary (or the four-plus-overthrow five) means
    /// no running, and for no-balls and wides the penalty run is not run.
    pub fn batters_crossed(&self) -> bool {
        match self {
            Outcome::Wicket => false,
            Outcome::Runs(n) => *n % 2 == 1 && *n != 5,
            Outcome::Bye(n) | Outcome::LegBye(n) => *n % 2 == 1,
            Outcome::NoBall(n) | Outcome::Wide(n) => n.saturating_sub(1) % 2 == 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Runs(n) => write!(f, "{n}"),
            Outcome::Wicket => write!(f, "W"),
            Outcome::Bye(n) => write!(f, "{n}b"),
            Outcome::LegBye(n) => write!(f, "{n}lb"),
            Outcome::NoBall(n) => write!(f, "{n}nb"),
            Outcome::Wide(n) => write!(f, "{n}w"),
        }
    }
}

impl FromStr for Outcome {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        let parse_err = || MatchError::Parse {
            kind: "outcome code".to_string(),
            value: s.to_string(),
        };

        if s == "W" {
            return Ok(Outcome::Wicket);
        }
        if let Ok(n) = s.parse::<u8>() {
            if n <= 6 {
                return Ok(Outcome::Runs(n));
            }
            return Err(parse_err());
        }

        let (digits, suffix) = s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(0));
        let n: u8 = digits.parse().map_err(|_| parse_err())?;
        match suffix {
            "nb" if n >= 1 => Ok(Outcome::NoBall(n)),
            "lb" if n >= 1 => Ok(Outcome::LegBye(n)),
            "b" if n >= 1 => Ok(Outcome::Bye(n)),
            "w" if n >= 1 => Ok(Outcome::Wide(n)),
            _ => Err(parse_err()),
        }
    }
}

impl TryFrom<String> for Outcome {
    type Error = MatchError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> String {
        outcome.to_string()
    }
}

use crate::utils::error::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bowling or batting arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arm {
    Left,
    Right,
}

impl Arm {
    pub fn as_char(&self) -> char {
        match self {
            Arm::Left => 'l',
            Arm::Right => 'r',
        }
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Arm::Left => "left",
            Arm::Right => "right",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Arm {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" | "l" => Ok(Arm::Left),
            "right" | "r" => Ok(Arm::Right),
            other => Err(MatchError::Parse {
                kind: "arm".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Bowling style, in the scorecard short form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BowlType {
    #[serde(rename = "m")]
    Medium,
    #[serde(rename = "mf")]
    MedFast,
    #[serde(rename = "fm")]
    FastMed,
    #[serde(rename = "f")]
    Fast,
    #[serde(rename = "ob")]
    Offbreak,
    #[serde(rename = "lb")]
    Legbreak,
}

impl BowlType {
    /// Spinners bowl long spells and tire slowly; the selection and
    /// fatigue models branch on this.
    pub fn is_spin(&self) -> bool {
        matches!(self, BowlType::Offbreak | BowlType::Legbreak)
    }

    /// Full commentary description, e.g. "right-arm fast-medium".
    ///
    /// Spin naming depends on the bowling arm: a left-armer's offbreak is
    /// wrist spin, a left-armer's legbreak is orthodox.
    pub fn long_descr(&self, arm: Arm) -> String {
        let style = match (self, arm) {
            (BowlType::Medium, _) => "medium",
            (BowlType::MedFast, _) => "medium-fast",
            (BowlType::FastMed, _) => "fast-medium",
            (BowlType::Fast, _) => "fast",
            (BowlType::Offbreak, Arm::Right) => "offspin",
            (BowlType::Offbreak, Arm::Left) => "wrist spin",
            (BowlType::Legbreak, Arm::Right) => "wrist spin",
            (BowlType::Legbreak, Arm::Left) => "orthodox",
        };
        format!("{arm}-arm {style}")
    }
}

impl fmt::Display for BowlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BowlType::Medium => "m",
            BowlType::MedFast => "mf",
            BowlType::FastMed => "fm",
            BowlType::Fast => "f",
            BowlType::Offbreak => "ob",
            BowlType::Legbreak => "lb",
        };
        write!(f, "{label}")
    }
}

impl FromStr for BowlType {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "m" => Ok(BowlType::Medium),
            "mf" => Ok(BowlType::MedFast),
            "fm" => Ok(BowlType::FastMed),
            "f" => Ok(BowlType::Fast),
            "ob" => Ok(BowlType::Offbreak),
            "lb" => Ok(BowlType::Legbreak),
            other => Err(MatchError::Parse {
                kind: "bowling type".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Mode of dismissal, in the scorecard short form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DismType {
    #[serde(rename = "b")]
    Bowled,
    #[serde(rename = "lbw")]
    Lbw,
    #[serde(rename = "c")]
    Caught,
    #[serde(rename = "c&b")]
    CaughtBowled,
    #[serde(rename = "ro")]
    RunOut,
    #[serde(rename = "st")]
    Stumped,
}

impl DismType {
    /// Whether the bowler is credited with the wicket.
    pub fn credits_bowler(&self) -> bool {
        !matches!(self, DismType::RunOut)
    }

    /// Whether the dismissal names a fielder.
    pub fn involves_fielder(&self) -> bool {
        matches!(self, DismType::Caught | DismType::RunOut | DismType::Stumped)
    }
}

impl fmt::Display for DismType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DismType::Bowled => "b",
            DismType::Lbw => "lbw",
            DismType::Caught => "c",
            DismType::CaughtBowled => "c&b",
            DismType::RunOut => "ro",
            DismType::Stumped => "st",
        };
        write!(f, "{label}")
    }
}

/// What the toss winner elected to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TossChoice {
    Bat,
    Field,
}

impl fmt::Display for TossChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TossChoice::Bat => "bat",
            TossChoice::Field => "field",
        };
        write!(f, "{label}")
    }
}

/// Classification of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Draw,
    WinChasing,
    WinBowling,
    WinInnings,
    Tie,
}

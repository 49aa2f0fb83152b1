use crate::domain::enums::{Arm, BowlType};
use serde::{Deserialize, Serialize};

/// Career record for an individual player.
///
/// Batting and bowling averages and strike rates are career figures; they
/// parameterize the delivery model and never change during a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Innings batted over the career.
    pub innings: u32,
    /// Average runs per dismissal.
    pub bat_avg: f64,
    /// Average runs per 100 balls faced.
    pub bat_sr: f64,
    /// Balls bowled over the career.
    pub balls_bowled: u32,
    /// Average runs conceded per wicket.
    pub bowl_avg: f64,
    /// Average balls bowled per wicket.
    pub bowl_sr: f64,
    /// Average runs conceded per six balls.
    pub bowl_econ: f64,
    pub bat_arm: Arm,
    pub bowl_arm: Arm,
    pub bowl_type: BowlType,
}

/// A player: names plus career statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    first_name: String,
    last_name: String,
    initials: String,
    stats: Stats,
}

impl Player {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        initials: impl Into<String>,
        stats: Stats,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            initials: initials.into(),
            stats,
        }
    }

    pub fn initials(&self) -> &str {
        &self.initials
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// First and last name, e.g. "Marnus Labuschagne".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Initials and last name, e.g. "M Labuschagne".
    pub fn full_initials(&self) -> String {
        if self.initials.is_empty() {
            self.last_name.clone()
        } else {
            format!("{} {}", self.initials, self.last_name)
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn innings(&self) -> u32 {
        self.stats.innings
    }

    pub fn bat_avg(&self) -> f64 {
        self.stats.bat_avg
    }

    pub fn bat_sr(&self) -> f64 {
        self.stats.bat_sr
    }

    pub fn balls_bowled(&self) -> u32 {
        self.stats.balls_bowled
    }

    pub fn bowl_avg(&self) -> f64 {
        self.stats.bowl_avg
    }

    pub fn bowl_sr(&self) -> f64 {
        self.stats.bowl_sr
    }

    pub fn bowl_econ(&self) -> f64 {
        self.stats.bowl_econ
    }

    pub fn bat_arm(&self) -> Arm {
        self.stats.bat_arm
    }

    pub fn bowl_arm(&self) -> Arm {
        self.stats.bowl_arm
    }

    pub fn bowl_type(&self) -> BowlType {
        self.stats.bowl_type
    }
}

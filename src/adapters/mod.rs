// Adapters layer: the filesystem side of the crate. JSON persistence for
// every domain object and CSV import for player data.

use crate::domain::enums::{Arm, BowlType};
use crate::domain::player::{Player, Stats};
use crate::domain::team::Team;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serialize a value to pretty JSON at `path`, creating parent
/// directories as needed. `load_json` is the exact inverse:
/// `load_json(dump_json(x)) == x` for every serde type in the crate.
pub fn dump_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(value)?;
    fs::write(path, payload)?;
    Ok(())
}

/// Deserialize a value from a JSON file written by `dump_json` (or by
/// hand).
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let data = fs::read(path)?;
    let value = serde_json::from_slice(&data)?;
    Ok(value)
}

/// Load a team from JSON and validate the XI before handing it out.
pub fn load_team(path: impl AsRef<Path>) -> Result<Team> {
    let team: Team = load_json(path)?;
    team.validate()?;
    Ok(team)
}

// One row of a player CSV file. The headers use the same short codes as
// the JSON model ("right", "lb", ...).
#[derive(Debug, Deserialize)]
struct PlayerRow {
    first_name: String,
    last_name: String,
    initials: String,
    innings: u32,
    bat_avg: f64,
    bat_sr: f64,
    balls_bowled: u32,
    bowl_avg: f64,
    bowl_sr: f64,
    bowl_econ: f64,
    bat_arm: Arm,
    bowl_arm: Arm,
    bowl_type: BowlType,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Player {
        Player::new(
            row.first_name,
            row.last_name,
            row.initials,
            Stats {
                innings: row.innings,
                bat_avg: row.bat_avg,
                bat_sr: row.bat_sr,
                balls_bowled: row.balls_bowled,
                bowl_avg: row.bowl_avg,
                bowl_sr: row.bowl_sr,
                bowl_econ: row.bowl_econ,
                bat_arm: row.bat_arm,
                bowl_arm: row.bowl_arm,
                bowl_type: row.bowl_type,
            },
        )
    }
}

/// Read players from a headed CSV file, in file order.
pub fn read_players_csv(path: impl AsRef<Path>) -> Result<Vec<Player>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut players = Vec::new();
    for row in reader.deserialize() {
        let row: PlayerRow = row?;
        players.push(Player::from(row));
    }
    Ok(players)
}

/// Specialist role indices for a CSV-imported XI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TeamRoles {
    pub captain: usize,
    pub wicket_keeper: usize,
    pub opening_bowlers: (usize, usize),
}

/// Build a validated team from a player CSV file; row order is the
/// batting order.
pub fn read_team_csv(
    name: impl Into<String>,
    path: impl AsRef<Path>,
    roles: TeamRoles,
) -> Result<Team> {
    let players = read_players_csv(path)?;
    Team::new(
        name,
        players,
        roles.captain,
        roles.wicket_keeper,
        roles.opening_bowlers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn json_dump_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep/nested/value.json");
        dump_json(&vec![1, 2, 3], &path).unwrap();
        let back: Vec<i32> = load_json(&path).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn players_csv_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("players.csv");
        std::fs::write(
            &path,
            "first_name,last_name,initials,innings,bat_avg,bat_sr,balls_bowled,bowl_avg,bowl_sr,bowl_econ,bat_arm,bowl_arm,bowl_type\n\
             Marnus,Labuschagne,M,23,63.43,56.52,756,38.66,63.0,3.68,right,right,lb\n\
             Pat,Cummins,PJ,61,16.5,41.0,12000,21.8,47.0,2.8,right,right,f\n",
        )
        .unwrap();

        let players = read_players_csv(&path).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].full_initials(), "M Labuschagne");
        assert_eq!(players[0].bowl_type(), BowlType::Legbreak);
        assert_eq!(players[1].bowl_type(), BowlType::Fast);
        assert_eq!(players[1].bat_arm(), Arm::Right);
    }

    #[test]
    fn malformed_csv_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(
            &path,
            "first_name,last_name,initials,innings\nMarnus,Labuschagne,M,23\n",
        )
        .unwrap();
        assert!(read_players_csv(&path).is_err());
    }
}

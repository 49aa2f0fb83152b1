pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::SimParams;

pub use core::engine::{Match, MatchReport, MatchResult};
pub use domain::{PitchFactors, Player, Pregame, Stats, Team, Venue};
pub use utils::error::{MatchError, Result};

pub mod cards;
pub mod clock;
pub mod engine;
pub mod innings;
pub mod outcome;
pub mod prediction;
pub mod scorebook;

pub use crate::utils::error::Result;
pub use cards::{BatStats, BatterCard, BowlStats, BowlerCard, Competency, Dismissal, Fatigue};
pub use clock::MatchClock;
pub use engine::{Match, MatchReport, MatchResult};
pub use innings::{Innings, InningsCard, InningsState};
pub use outcome::Outcome;
pub use scorebook::{Ball, Extras, FallOfWicket, Over, Partnership};

// Domain layer: the cricket data model. No dependencies beyond std/serde.

pub mod enums;
pub mod player;
pub mod pregame;
pub mod team;

pub use enums::{Arm, BowlType, DismType, ResultType, TossChoice};
pub use player::{Player, Stats};
pub use pregame::{PitchFactors, Pregame, Toss, Venue};
pub use team::{PlayerId, Team, XI};

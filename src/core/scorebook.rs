use crate::core::outcome::Outcome;
use crate::domain::team::{PlayerId, Team};
use serde::{Deserialize, Serialize};

/// One delivery as recorded in the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Index into the bowling XI.
    pub bowler: PlayerId,
    /// Index into the batting XI.
    pub batter: PlayerId,
    pub outcome: Outcome,
    pub legal: bool,
    pub commentary: String,
}

/// The deliveries of a single over. Completes at six legal balls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Over {
    number: u32,
    balls: Vec<Ball>,
    legal_delivs: u32,
}

impl Over {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            balls: Vec::new(),
            legal_delivs: 0,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn num_balls(&self) -> u32 {
        self.balls.len() as u32
    }

    pub fn legal_delivs(&self) -> u32 {
        self.legal_delivs
    }

    pub fn is_complete(&self) -> bool {
        self.legal_delivs >= 6
    }

    pub fn add_ball(&mut self, ball: Ball) {
        if ball.legal {
            self.legal_delivs += 1;
        }
        self.balls.push(ball);
    }
}

/// Extras conceded in an innings, by scorebook bucket. Each field holds
/// runs, not deliveries: a wide down the leg side that runs away for
/// five is five wides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extras {
    pub byes: u32,
    pub legbyes: u32,
    pub noballs: u32,
    pub wides: u32,
}

impl Extras {
    /// Accumulate a delivery; returns whether it was legal.
    pub fn update(&mut self, outcome: &Outcome) -> bool {
        match outcome {
            Outcome::Bye(n) => self.byes += u32::from(*n),
            Outcome::LegBye(n) => self.legbyes += u32::from(*n),
            // Only the penalty is a no-ball extra; the rest went to the
            // batter.
            Outcome::NoBall(_) => self.noballs += 1,
            Outcome::Wide(n) => self.wides += u32::from(*n),
            Outcome::Runs(_) | Outcome::Wicket => {}
        }
        outcome.is_legal()
    }

    pub fn total(&self) -> u32 {
        self.byes + self.legbyes + self.noballs + self.wides
    }

    /// "b 4, lb 2, nb 1, w 3" with empty buckets omitted.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.byes > 0 {
            parts.push(format!("b {}", self.byes));
        }
        if self.legbyes > 0 {
            parts.push(format!("lb {}", self.legbyes));
        }
        if self.noballs > 0 {
            parts.push(format!("nb {}", self.noballs));
        }
        if self.wides > 0 {
            parts.push(format!("w {}", self.wides));
        }
        parts.join(", ")
    }
}

/// The scoreboard at the fall of a wicket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallOfWicket {
    pub batter: PlayerId,
    pub wkts: u32,
    pub runs: u32,
    pub overs: u32,
    pub balls: u32,
}

impl FallOfWicket {
    /// "123-4 (Joe Root, 45.2 ov)"
    pub fn describe(&self, batting_team: &Team) -> String {
        format!(
            "{}-{} ({}, {}.{} ov)",
            self.runs,
            self.wkts,
            batting_team.player(self.batter.0).full_name(),
            self.overs,
            self.balls,
        )
    }
}

/// A stand between two batters, with the per-batter split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partnership {
    bat1: PlayerId,
    bat2: PlayerId,
    runs: u32,
    bat1_runs: u32,
    bat1_balls: u32,
    bat2_runs: u32,
    bat2_balls: u32,
    unbroken: bool,
}

impl Partnership {
    pub fn new(bat1: PlayerId, bat2: PlayerId) -> Self {
        Self {
            bat1,
            bat2,
            runs: 0,
            bat1_runs: 0,
            bat1_balls: 0,
            bat2_runs: 0,
            bat2_balls: 0,
            unbroken: true,
        }
    }

    pub fn bat1(&self) -> PlayerId {
        self.bat1
    }

    pub fn bat2(&self) -> PlayerId {
        self.bat2
    }

    /// All runs scored while the stand was live, extras included.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn balls(&self) -> u32 {
        self.bat1_balls + self.bat2_balls
    }

    pub fn is_unbroken(&self) -> bool {
        self.unbroken
    }

    /// Record a delivery faced while this stand is live. `striker` picks
    /// which batter's split the off-the-bat runs go to.
    pub fn add(&mut self, outcome: &Outcome, striker: PlayerId) {
        self.runs += outcome.team_runs();
        let bat_runs = outcome.batter_runs();
        let faced = u32::from(outcome.counts_ball_faced());
        if striker == self.bat2 {
            self.bat2_runs += bat_runs;
            self.bat2_balls += faced;
        } else {
            self.bat1_runs += bat_runs;
            self.bat1_balls += faced;
        }
    }

    pub fn end(&mut self) {
        self.unbroken = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(outcome: Outcome) -> Ball {
        Ball {
            bowler: PlayerId(10),
            batter: PlayerId(0),
            legal: outcome.is_legal(),
            commentary: String::new(),
            outcome,
        }
    }

    #[test]
    fn over_completes_on_six_legal_balls() {
        let mut over = Over::new(1);
        for _ in 0..5 {
            over.add_ball(ball(Outcome::Runs(0)));
        }
        over.add_ball(ball(Outcome::Wide(1)));
        assert!(!over.is_complete());
        over.add_ball(ball(Outcome::Runs(2)));
        assert!(over.is_complete());
        assert_eq!(over.num_balls(), 7);
        assert_eq!(over.legal_delivs(), 6);
    }

    #[test]
    fn extras_buckets() {
        let mut extras = Extras::default();
        assert!(extras.update(&Outcome::Bye(4)));
        assert!(extras.update(&Outcome::LegBye(2)));
        assert!(!extras.update(&Outcome::NoBall(5)));
        assert!(!extras.update(&Outcome::Wide(3)));
        assert!(extras.update(&Outcome::Runs(4)));

        assert_eq!(extras.byes, 4);
        assert_eq!(extras.legbyes, 2);
        assert_eq!(extras.noballs, 1);
        assert_eq!(extras.wides, 3);
        assert_eq!(extras.total(), 10);
        assert_eq!(extras.describe(), "b 4, lb 2, nb 1, w 3");
    }

    #[test]
    fn empty_extras_describe_as_nothing() {
        assert_eq!(Extras::default().describe(), "");
    }

    #[test]
    fn partnership_split() {
        let mut stand = Partnership::new(PlayerId(0), PlayerId(1));
        stand.add(&Outcome::Runs(4), PlayerId(0));
        stand.add(&Outcome::Runs(1), PlayerId(1));
        stand.add(&Outcome::Bye(2), PlayerId(0));
        stand.add(&Outcome::Wide(1), PlayerId(1));

        assert_eq!(stand.runs(), 8);
        assert_eq!(stand.bat1_runs, 4);
        assert_eq!(stand.bat1_balls, 2);
        assert_eq!(stand.bat2_runs, 1);
        assert_eq!(stand.bat2_balls, 1);
        assert_eq!(stand.balls(), 3);
        assert!(stand.is_unbroken());
        stand.end();
        assert!(!stand.is_unbroken());
    }
}

use crate::config::SimParams;
use crate::core::outcome::Outcome;
use crate::domain::enums::{Arm, BowlType, DismType};
use crate::domain::player::Player;
use crate::domain::team::{PlayerId, Team};
use crate::utils::error::{MatchError, Result};
use crate::utils::format::rate_str;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Batting state carried through an innings: career anchors for the
/// delivery model plus the live score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatStats {
    pub bat_avg: f64,
    pub strike_rate: f64,
    pub bat_arm: Arm,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
}

/// Bowling state carried through an innings, including the slice for the
/// current spell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlStats {
    pub bowl_avg: f64,
    pub strike_rate: f64,
    pub bowl_type: BowlType,
    /// Every delivery, legal or not.
    pub balls: u32,
    pub legal_balls: u32,
    pub overs: u32,
    pub over_balls: u32,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub spell_balls: u32,
    pub spell_overs: u32,
    pub spell_maidens: u32,
    pub spell_runs: u32,
    pub spell_wickets: u32,
}

/// How a batter got out, scorecard-style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dismissal {
    mode: DismType,
    bowler: Option<PlayerId>,
    fielder: Option<PlayerId>,
}

impl Dismissal {
    /// Run-outs carry no bowler credit; only caught, run out and stumped
    /// name a fielder. Anything passed outside those rules is discarded.
    pub fn new(mode: DismType, bowler: Option<PlayerId>, fielder: Option<PlayerId>) -> Self {
        Self {
            mode,
            bowler: if mode.credits_bowler() { bowler } else { None },
            fielder: if mode.involves_fielder() { fielder } else { None },
        }
    }

    pub fn mode(&self) -> DismType {
        self.mode
    }

    pub fn bowler(&self) -> Option<PlayerId> {
        self.bowler
    }

    pub fn fielder(&self) -> Option<PlayerId> {
        self.fielder
    }

    /// Scorecard text: "b Anderson", "c Root b Anderson", "run out (Stokes)".
    pub fn describe(&self, fielding_team: &Team) -> String {
        let name = |id: Option<PlayerId>| {
            id.map(|PlayerId(i)| fielding_team.player(i).last_name().to_string())
                .unwrap_or_default()
        };
        let bowler = name(self.bowler);
        let fielder = name(self.fielder);

        match self.mode {
            DismType::Bowled => format!("b {bowler}"),
            DismType::Lbw => format!("lbw {bowler}"),
            DismType::Caught => format!("c {fielder} b {bowler}"),
            DismType::Stumped => format!("st {fielder} b {bowler}"),
            DismType::CaughtBowled => format!("c&b {bowler}"),
            DismType::RunOut => format!("run out ({fielder})"),
        }
    }
}

/// Bowler tiredness. Grows with every ball bowled, shrinks with rest;
/// taking a wicket is a shot of energy. The bowling manager reads it
/// when deciding on a change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fatigue {
    value: f64,
}

impl Fatigue {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn ball_bowled(
        &mut self,
        bowl_type: BowlType,
        params: &SimParams,
        rng: &mut impl Rng,
    ) -> Result<()> {
        let mut mean = if bowl_type.is_spin() {
            params.spin_fatigue_mean
        } else {
            params.pace_fatigue_mean
        };
        if matches!(bowl_type, BowlType::Fast | BowlType::FastMed) {
            mean += params.extra_pace_penalty;
        }
        let dist = Normal::new(mean, params.fatigue_std).map_err(|e| MatchError::Simulation {
            message: format!("invalid fatigue distribution: {e}"),
        })?;
        self.value = (self.value + dist.sample(rng)).max(0.0);
        Ok(())
    }

    pub fn wicket(&mut self, params: &SimParams) {
        self.value = (self.value - params.wicket_relief).max(0.0);
    }

    /// One over spent off the attack.
    pub fn rest(&mut self, params: &SimParams) {
        self.value = (self.value - params.rest_recovery).max(0.0);
    }
}

/// How seriously a player's bowling is to be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competency {
    FullTime,
    PartTime,
    /// Only bowls when the scoreboard reads something like 2/700.
    LastResort,
}

// Career balls-per-innings thresholds separating full-time bowlers from
// part-timers and from batters who merely own a pair of boots.
const FULL_TIME_BPI: f64 = 12.0;
const PART_TIME_BPI: f64 = 3.0;

// A player who almost never bowls can carry an absurdly flattering
// average from a handful of lucky overs. Floors applied before their
// figures reach the delivery model.
const INFLATED_BOWL_AVG: f64 = 60.0;
const INFLATED_BOWL_SR: f64 = 120.0;

fn competency(player: &Player) -> Competency {
    if player.innings() == 0 {
        return Competency::LastResort;
    }
    let bpi = f64::from(player.balls_bowled()) / f64::from(player.innings());
    if bpi >= FULL_TIME_BPI {
        Competency::FullTime
    } else if bpi >= PART_TIME_BPI {
        Competency::PartTime
    } else {
        Competency::LastResort
    }
}

/// A batter's live record for one innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterCard {
    player: PlayerId,
    stats: BatStats,
    active: bool,
    out: bool,
    dismissal: Option<Dismissal>,
}

impl BatterCard {
    pub fn new(player: PlayerId, detail: &Player) -> Self {
        Self {
            player,
            stats: BatStats {
                bat_avg: detail.bat_avg(),
                strike_rate: detail.bat_sr(),
                bat_arm: detail.bat_arm(),
                runs: 0,
                balls: 0,
                fours: 0,
                sixes: 0,
            },
            active: false,
            out: false,
            dismissal: None,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn stats(&self) -> &BatStats {
        &self.stats
    }

    /// Whether the batter has come to the crease this innings.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_out(&self) -> bool {
        self.out
    }

    pub fn dismissal(&self) -> Option<&Dismissal> {
        self.dismissal.as_ref()
    }

    /// Mark the batter as arrived at the crease. A batter only walks out
    /// once an innings.
    pub fn activate(&mut self) -> Result<()> {
        if self.active {
            return Err(MatchError::Simulation {
                message: format!("batter {} activated twice", self.player.0),
            });
        }
        self.active = true;
        Ok(())
    }

    pub fn update_score(&mut self, outcome: &Outcome) {
        if outcome.counts_ball_faced() {
            self.stats.balls += 1;
        }
        let runs = outcome.batter_runs();
        self.stats.runs += runs;
        match runs {
            // Five off the bat is a four plus an overthrow.
            4 | 5 => self.stats.fours += 1,
            6 => self.stats.sixes += 1,
            _ => {}
        }
        if matches!(outcome, Outcome::Wicket) {
            self.out = true;
        }
    }

    pub fn dismiss(&mut self, mode: DismType, bowler: Option<PlayerId>, fielder: Option<PlayerId>) {
        self.dismissal = Some(Dismissal::new(mode, bowler, fielder));
        self.out = true;
    }

    /// Dismissal fragment for the scorecard, "not out" while unbeaten.
    pub fn dismissal_text(&self, fielding_team: &Team) -> String {
        match &self.dismissal {
            Some(dism) => dism.describe(fielding_team),
            None => "not out".to_string(),
        }
    }

    /// Full card line, e.g.
    /// "M Labuschagne c Root b Anderson 56 (98b 6x4 0x6) SR: 57.14".
    pub fn card_line(&self, batting_team: &Team, fielding_team: &Team) -> String {
        let name = batting_team.player(self.player.0).full_initials();
        format!(
            "{} {} {} ({}b {}x4 {}x6) SR: {}",
            name,
            self.dismissal_text(fielding_team),
            self.stats.runs,
            self.stats.balls,
            self.stats.fours,
            self.stats.sixes,
            rate_str(f64::from(self.stats.runs) * 100.0, f64::from(self.stats.balls)),
        )
    }
}

/// A bowler's live record for one innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlerCard {
    player: PlayerId,
    stats: BowlStats,
    active: bool,
    competency: Competency,
    fatigue: Fatigue,
    is_maiden: bool,
}

impl BowlerCard {
    pub fn new(player: PlayerId, detail: &Player) -> Self {
        // Guard against "cheating" part-timers whose averages rest on a
        // few dozen career balls.
        let rarely_bowls = detail.innings() > 0
            && f64::from(detail.balls_bowled()) / f64::from(detail.innings()) < 1.0;
        let (bowl_avg, strike_rate) = if rarely_bowls {
            (
                detail.bowl_avg().max(INFLATED_BOWL_AVG),
                detail.bowl_sr().max(INFLATED_BOWL_SR),
            )
        } else {
            (detail.bowl_avg(), detail.bowl_sr())
        };

        Self {
            player,
            stats: BowlStats {
                bowl_avg,
                strike_rate,
                bowl_type: detail.bowl_type(),
                balls: 0,
                legal_balls: 0,
                overs: 0,
                over_balls: 0,
                maidens: 0,
                runs: 0,
                wickets: 0,
                spell_balls: 0,
                spell_overs: 0,
                spell_maidens: 0,
                spell_runs: 0,
                spell_wickets: 0,
            },
            active: false,
            competency: competency(detail),
            fatigue: Fatigue::default(),
            is_maiden: true,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn stats(&self) -> &BowlStats {
        &self.stats
    }

    pub fn competency(&self) -> Competency {
        self.competency
    }

    pub fn tiredness(&self) -> f64 {
        self.fatigue.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start_new_spell(&mut self) {
        self.stats.spell_balls = 0;
        self.stats.spell_overs = 0;
        self.stats.spell_maidens = 0;
        self.stats.spell_runs = 0;
        self.stats.spell_wickets = 0;
        self.is_maiden = true;
        self.active = true;
    }

    /// An over passed at the other end without this bowler bowling.
    pub fn over_rest(&mut self, params: &SimParams) {
        self.active = false;
        self.fatigue.rest(params);
    }

    pub fn ball_bowled(&mut self, params: &SimParams, rng: &mut impl Rng) -> Result<()> {
        self.fatigue
            .ball_bowled(self.stats.bowl_type, params, rng)
    }

    pub fn wicket_taken(&mut self, params: &SimParams) {
        self.fatigue.wicket(params);
    }

    pub fn update_score(&mut self, outcome: &Outcome) {
        self.stats.balls += 1;
        self.stats.spell_balls += 1;

        let conceded = outcome.bowler_runs();
        self.stats.runs += conceded;
        self.stats.spell_runs += conceded;
        // Runs off the bat, wides and no-balls all break a maiden;
        // byes and leg-byes do not.
        if conceded > 0 {
            self.is_maiden = false;
        }

        if matches!(outcome, Outcome::Wicket) {
            self.stats.wickets += 1;
            self.stats.spell_wickets += 1;
        }

        if outcome.is_legal() {
            self.add_legal_ball();
        }
    }

    fn add_legal_ball(&mut self) {
        self.stats.legal_balls += 1;
        self.stats.over_balls += 1;
        if self.stats.over_balls == 6 {
            self.stats.overs += 1;
            self.stats.spell_overs += 1;
            self.stats.over_balls = 0;
            if self.is_maiden {
                self.stats.maidens += 1;
                self.stats.spell_maidens += 1;
            }
            self.is_maiden = true;
        }
    }

    fn figures_from(&self, overs: u32, over_balls: u32, maidens: u32, runs: u32, wickets: u32) -> String {
        let overs_part = if over_balls > 0 {
            format!("{overs}.{over_balls}")
        } else {
            overs.to_string()
        };
        format!("{overs_part}-{maidens}-{runs}-{wickets}")
    }

    /// Innings figures, e.g. "JM Anderson 12.3-4-31-2".
    pub fn card_line(&self, fielding_team: &Team) -> String {
        let name = fielding_team.player(self.player.0).full_initials();
        let figures = self.figures_from(
            self.stats.overs,
            self.stats.over_balls,
            self.stats.maidens,
            self.stats.runs,
            self.stats.wickets,
        );
        format!("{name} {figures}")
    }

    /// Current-spell figures in the same notation.
    pub fn spell_line(&self, fielding_team: &Team) -> String {
        let name = fielding_team.player(self.player.0).full_initials();
        let figures = self.figures_from(
            self.stats.spell_overs,
            self.stats.over_balls,
            self.stats.spell_maidens,
            self.stats.spell_runs,
            self.stats.spell_wickets,
        );
        format!("{name} {figures}")
    }

    /// Economy over the whole innings, "-" before the first legal ball.
    pub fn economy(&self) -> String {
        rate_str(
            f64::from(self.stats.runs),
            f64::from(self.stats.legal_balls) / 6.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::Stats;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stats(balls_bowled: u32, innings: u32) -> Stats {
        Stats {
            innings,
            bat_avg: 40.0,
            bat_sr: 55.0,
            balls_bowled,
            bowl_avg: 30.0,
            bowl_sr: 60.0,
            bowl_econ: 3.0,
            bat_arm: Arm::Right,
            bowl_arm: Arm::Right,
            bowl_type: BowlType::FastMed,
        }
    }

    fn batter() -> BatterCard {
        let player = Player::new("Joe", "Root", "JE", stats(1000, 100));
        BatterCard::new(PlayerId(3), &player)
    }

    fn bowler() -> BowlerCard {
        let player = Player::new("James", "Anderson", "JM", stats(30000, 150));
        BowlerCard::new(PlayerId(10), &player)
    }

    #[test]
    fn batter_scoring_table() {
        let mut card = batter();
        card.update_score(&Outcome::Runs(0));
        card.update_score(&Outcome::Runs(1));
        card.update_score(&Outcome::Runs(4));
        card.update_score(&Outcome::Runs(6));
        card.update_score(&Outcome::Runs(5));
        card.update_score(&Outcome::Bye(2));
        card.update_score(&Outcome::LegBye(1));
        card.update_score(&Outcome::Wide(1));
        card.update_score(&Outcome::NoBall(5));

        let s = card.stats();
        // 0+1+4+6+5 off the bat plus 4 from the no-ball
        assert_eq!(s.runs, 20);
        // every delivery except the wide
        assert_eq!(s.balls, 8);
        // the four, the overthrow five, and the no-ball four
        assert_eq!(s.fours, 3);
        assert_eq!(s.sixes, 1);
        assert!(!card.is_out());
    }

    #[test]
    fn batter_wicket() {
        let mut card = batter();
        card.update_score(&Outcome::Wicket);
        assert!(card.is_out());
        assert_eq!(card.stats().balls, 1);
    }

    #[test]
    fn batter_activates_once() {
        let mut card = batter();
        card.activate().unwrap();
        assert!(card.is_active());
        assert!(card.activate().is_err());
    }

    #[test]
    fn maiden_over_detected() {
        let mut card = bowler();
        for _ in 0..6 {
            card.update_score(&Outcome::Runs(0));
        }
        assert_eq!(card.stats().overs, 1);
        assert_eq!(card.stats().maidens, 1);

        // A bye does not break the next maiden, a run does.
        card.update_score(&Outcome::Bye(4));
        for _ in 0..4 {
            card.update_score(&Outcome::Runs(0));
        }
        card.update_score(&Outcome::Runs(1));
        assert_eq!(card.stats().overs, 2);
        assert_eq!(card.stats().maidens, 1);
    }

    #[test]
    fn illegal_deliveries_do_not_advance_the_over() {
        let mut card = bowler();
        card.update_score(&Outcome::Wide(1));
        card.update_score(&Outcome::NoBall(1));
        let s = card.stats();
        assert_eq!(s.balls, 2);
        assert_eq!(s.legal_balls, 0);
        assert_eq!(s.over_balls, 0);
        assert_eq!(s.runs, 2);
    }

    #[test]
    fn bowler_figures_format() {
        let mut card = bowler();
        for _ in 0..6 {
            card.update_score(&Outcome::Runs(0));
        }
        card.update_score(&Outcome::Runs(4));
        card.update_score(&Outcome::Wicket);
        let player = Player::new("James", "Anderson", "JM", stats(30000, 150));
        let mut players: Vec<Player> = (0..10)
            .map(|i| Player::new(format!("F{i}"), format!("L{i}"), "X", stats(0, 10)))
            .collect();
        players.push(player);
        let team = Team::new("England", players, 0, 1, (9, 10)).unwrap();
        assert_eq!(card.card_line(&team), "JM Anderson 1.2-1-4-1");
    }

    #[test]
    fn part_timer_classification() {
        let full = Player::new("Pat", "Cummins", "PJ", stats(20000, 80));
        let part = Player::new("Joe", "Root", "JE", stats(900, 150));
        let none = Player::new("Jonny", "Bairstow", "JM", stats(60, 120));
        assert_eq!(BowlerCard::new(PlayerId(0), &full).competency(), Competency::FullTime);
        assert_eq!(BowlerCard::new(PlayerId(0), &part).competency(), Competency::PartTime);
        assert_eq!(BowlerCard::new(PlayerId(0), &none).competency(), Competency::LastResort);
    }

    #[test]
    fn rare_bowler_averages_inflated() {
        let card = BowlerCard::new(PlayerId(0), &Player::new("A", "B", "A", stats(60, 120)));
        assert_eq!(card.stats().bowl_avg, INFLATED_BOWL_AVG);
        assert_eq!(card.stats().strike_rate, INFLATED_BOWL_SR);
    }

    #[test]
    fn fatigue_grows_and_recovers() {
        let params = SimParams::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut card = bowler();
        for _ in 0..60 {
            card.ball_bowled(&params, &mut rng).unwrap();
        }
        let tired = card.tiredness();
        assert!(tired > 0.0);
        card.over_rest(&params);
        assert!(card.tiredness() < tired);
        card.wicket_taken(&params);
        assert!(card.tiredness() <= tired);
    }

    #[test]
    fn dismissal_grammar() {
        let players: Vec<Player> = [
            ("James", "Anderson", "JM"),
            ("Joe", "Root", "JE"),
            ("Ben", "Stokes", "BA"),
            ("Jonny", "Bairstow", "JM"),
            ("Stuart", "Broad", "SCJ"),
            ("Ollie", "Pope", "OJD"),
            ("Zak", "Crawley", "Z"),
            ("Harry", "Brook", "HC"),
            ("Jack", "Leach", "MJ"),
            ("Mark", "Wood", "MA"),
            ("Chris", "Woakes", "CR"),
        ]
        .iter()
        .map(|(f, l, i)| Player::new(*f, *l, *i, stats(100, 10)))
        .collect();
        let england = Team::new("England", players, 2, 3, (0, 4)).unwrap();

        let bowled = Dismissal::new(DismType::Bowled, Some(PlayerId(0)), None);
        assert_eq!(bowled.describe(&england), "b Anderson");

        let caught = Dismissal::new(DismType::Caught, Some(PlayerId(0)), Some(PlayerId(1)));
        assert_eq!(caught.describe(&england), "c Root b Anderson");

        let stumped = Dismissal::new(DismType::Stumped, Some(PlayerId(8)), Some(PlayerId(3)));
        assert_eq!(stumped.describe(&england), "st Bairstow b Leach");

        let candb = Dismissal::new(DismType::CaughtBowled, Some(PlayerId(0)), None);
        assert_eq!(candb.describe(&england), "c&b Anderson");

        // A run-out drops the bowler credit even if one is passed.
        let run_out = Dismissal::new(DismType::RunOut, Some(PlayerId(0)), Some(PlayerId(2)));
        assert_eq!(run_out.bowler(), None);
        assert_eq!(run_out.describe(&england), "run out (Stokes)");
    }
}

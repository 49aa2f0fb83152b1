use crate::config::SimParams;
use crate::core::clock::MatchClock;
use crate::core::innings::{Innings, InningsCard, InningsState};
use crate::core::prediction;
use crate::domain::enums::{ResultType, TossChoice};
use crate::domain::pregame::{Pregame, Toss};
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::Validate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of a finished match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub result_type: ResultType,
    pub winner: Option<String>,
    pub margin: Option<u32>,
}

impl MatchResult {
    fn drawn() -> Self {
        Self {
            result_type: ResultType::Draw,
            winner: None,
            margin: None,
        }
    }

    fn tied() -> Self {
        Self {
            result_type: ResultType::Tie,
            winner: None,
            margin: None,
        }
    }

    fn won(result_type: ResultType, winner: &str, margin: u32) -> Self {
        Self {
            result_type,
            winner: Some(winner.to_string()),
            margin: Some(margin),
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let winner = self.winner.as_deref().unwrap_or("");
        let margin = self.margin.unwrap_or(0);
        let plural = |n: u32, s: &str| {
            if n == 1 {
                s.to_string()
            } else {
                format!("{s}s")
            }
        };
        match self.result_type {
            ResultType::Draw => write!(f, "Match drawn"),
            ResultType::Tie => write!(f, "Match tied"),
            ResultType::WinInnings => write!(
                f,
                "{winner} won by an innings and {margin} {}",
                plural(margin, "run")
            ),
            ResultType::WinBowling => {
                write!(f, "{winner} won by {margin} {}", plural(margin, "run"))
            }
            ResultType::WinChasing => {
                write!(f, "{winner} won by {margin} {}", plural(margin, "wicket"))
            }
        }
    }
}

/// Everything a finished match produced, ready for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub toss: Toss,
    pub result: MatchResult,
    pub innings: Vec<InningsCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
}

impl Side {
    fn other(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// A single test match: toss, up to four innings, a result.
pub struct Match {
    pregame: Pregame,
    params: SimParams,
    clock: MatchClock,
    toss: Option<Toss>,
    toss_winner: Option<Side>,
    cards: Vec<InningsCard>,
    result: Option<MatchResult>,
}

impl Match {
    pub fn new(pregame: Pregame, params: SimParams) -> Result<Self> {
        pregame.home_team.validate()?;
        pregame.away_team.validate()?;
        params.validate()?;
        let clock = MatchClock::new(&params);
        Ok(Self {
            pregame,
            params,
            clock,
            toss: None,
            toss_winner: None,
            cards: Vec::new(),
            result: None,
        })
    }

    pub fn toss(&self) -> Option<&Toss> {
        self.toss.as_ref()
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn scorecards(&self) -> &[InningsCard] {
        &self.cards
    }

    /// Consolidated report; only available once the match has run.
    pub fn report(&self) -> Result<MatchReport> {
        match (&self.toss, &self.result) {
            (Some(toss), Some(result)) => Ok(MatchReport {
                toss: toss.clone(),
                result: result.clone(),
                innings: self.cards.clone(),
            }),
            _ => Err(MatchError::Simulation {
                message: "match has not been simulated yet".to_string(),
            }),
        }
    }

    /// Simulate the toss: a fair coin for the winner, then the election
    /// model for what they do with it.
    pub fn simulate_toss(&mut self, rng: &mut impl Rng) -> &Toss {
        let winner_is_home = rng.gen_bool(0.5);
        let winner = if winner_is_home {
            self.pregame.home_team.name()
        } else {
            self.pregame.away_team.name()
        };

        let p_field = prediction::toss_elect(
            self.pregame.venue.pitch_factors.spin,
            &self.params,
        );
        let choice = if rng.gen_bool(p_field.clamp(0.0, 1.0)) {
            TossChoice::Field
        } else {
            TossChoice::Bat
        };

        let toss = Toss {
            winner: winner.to_string(),
            choice,
        };
        tracing::info!("{toss}");
        // Remember which side won for seating the first innings.
        self.toss_winner = Some(if winner_is_home { Side::Home } else { Side::Away });
        &*self.toss.insert(toss)
    }

    /// Run the match to a result.
    pub fn run(&mut self, rng: &mut impl Rng) -> Result<&MatchResult> {
        if self.result.is_some() {
            return Err(MatchError::Simulation {
                message: "match has already been simulated".to_string(),
            });
        }
        if self.toss.is_none() {
            self.simulate_toss(rng);
        }

        let Self {
            pregame,
            params,
            clock,
            toss,
            cards,
            result,
            toss_winner,
        } = self;

        let toss = toss.as_ref().ok_or_else(|| MatchError::Simulation {
            message: "toss missing".to_string(),
        })?;
        let winner_side = toss_winner.ok_or_else(|| MatchError::Simulation {
            message: "toss winner missing".to_string(),
        })?;

        let mut bat_side = match toss.choice {
            TossChoice::Bat => winner_side,
            TossChoice::Field => winner_side.other(),
        };
        let team_of = |side: Side| match side {
            Side::Home => &pregame.home_team,
            Side::Away => &pregame.away_team,
        };

        let mut lead: i32 = 0;
        for inns_no in 1..=4u32 {
            let team_bat = team_of(bat_side);
            let team_bowl = team_of(bat_side.other());

            let mut innings = Innings::new(
                inns_no,
                team_bat,
                team_bowl,
                lead,
                &pregame.venue.pitch_factors,
                params,
                rng,
            )?;
            let state = innings.simulate(clock, rng)?;
            lead = innings.lead();
            let wkts = innings.wkts();
            cards.push(innings.card());

            match state {
                InningsState::CloseOfPlay => {
                    *result = Some(MatchResult::drawn());
                    break;
                }
                InningsState::TargetReached => {
                    *result = Some(MatchResult::won(
                        ResultType::WinChasing,
                        team_bat.name(),
                        10 - wkts,
                    ));
                    break;
                }
                InningsState::AllOut | InningsState::Declared => {
                    if inns_no == 3 && lead < 0 {
                        // Beaten without the last side needing to bat again.
                        *result = Some(MatchResult::won(
                            ResultType::WinInnings,
                            team_bowl.name(),
                            lead.unsigned_abs(),
                        ));
                        break;
                    }
                    if inns_no == 4 {
                        *result = Some(if lead == 0 {
                            MatchResult::tied()
                        } else {
                            MatchResult::won(
                                ResultType::WinBowling,
                                team_bowl.name(),
                                lead.unsigned_abs(),
                            )
                        });
                        break;
                    }

                    if inns_no == 2 && Self::decide_follow_on(-lead, params, rng) {
                        tracing::info!(
                            "{} enforce the follow-on, leading by {}",
                            team_bowl.name(),
                            -lead
                        );
                        // Same side bats again; the deficit stands.
                    } else {
                        bat_side = bat_side.other();
                        lead = -lead;
                    }
                }
            }
        }

        let result = self.result.as_ref().ok_or_else(|| MatchError::Simulation {
            message: "match ended without producing a result".to_string(),
        })?;
        tracing::info!("{result}");
        Ok(result)
    }

    /// Enforce the follow-on? Never under the threshold lead; above it,
    /// the probability climbs with the lead.
    fn decide_follow_on(lead: i32, params: &SimParams, rng: &mut impl Rng) -> bool {
        let p = prediction::follow_on(lead, params);
        p > 0.0 && rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

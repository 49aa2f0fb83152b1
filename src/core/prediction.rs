//! Probability models driving the simulation.
//!
//! Every model returns an explicit probability table; sampling is a
//! separate step so the tables can be inspected and tested.

use crate::config::SimParams;
use crate::core::cards::{BatStats, BowlStats};
use crate::core::outcome::Outcome;
use crate::domain::enums::{BowlType, DismType};
use crate::domain::pregame::PitchFactors;
use crate::utils::error::{MatchError, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

// Run distribution for a batter striking at the reference rate. The
// scoring masses scale with the batter's strike rate; the dot ball
// absorbs the remainder.
const BASE_P1: f64 = 0.150;
const BASE_P2: f64 = 0.045;
const BASE_P3: f64 = 0.005;
const BASE_P4: f64 = 0.065;
const BASE_P5: f64 = 0.001;
const BASE_P6: f64 = 0.004;

// Bounds keeping degenerate career figures from producing degenerate
// tables.
const MIN_BOWL_SR: f64 = 30.0;
const MIN_BAT_AVG: f64 = 5.0;
const MIN_BAT_SR: f64 = 10.0;
const MIN_WICKET_PROB: f64 = 0.001;
const MAX_WICKET_PROB: f64 = 0.2;
const MIN_DOT_PROB: f64 = 0.05;

/// Outcome distribution for one delivery.
///
/// The wicket probability is anchored on the bowler's career strike rate
/// (one wicket per `sr` balls), pushed around by the batter's average
/// relative to a reference batter and by how much the pitch offers this
/// style of bowling. The scoring outcomes scale with the batter's career
/// strike rate.
pub fn delivery(
    bat: &BatStats,
    bowl: &BowlStats,
    pitch: &PitchFactors,
    params: &SimParams,
) -> Vec<(Outcome, f64)> {
    let pitch_factor = if bowl.bowl_type.is_spin() {
        pitch.spin
    } else {
        pitch.seam
    };

    let p_wicket = ((1.0 / bowl.strike_rate.max(MIN_BOWL_SR))
        * (params.reference_bat_avg / bat.bat_avg.max(MIN_BAT_AVG))
        * pitch_factor)
        .clamp(MIN_WICKET_PROB, MAX_WICKET_PROB);

    let scale = bat.strike_rate.max(MIN_BAT_SR) / params.reference_bat_sr;
    let mut scoring = [
        (Outcome::Runs(1), BASE_P1 * scale),
        (Outcome::Runs(2), BASE_P2 * scale),
        (Outcome::Runs(3), BASE_P3 * scale),
        (Outcome::Runs(4), BASE_P4 * scale),
        (Outcome::Runs(5), BASE_P5 * scale),
        (Outcome::Runs(6), BASE_P6 * scale),
    ];

    let p_extras = params.wide_prob + params.no_ball_prob + params.bye_prob + params.leg_bye_prob;
    let scoring_sum: f64 = scoring.iter().map(|(_, p)| p).sum();
    let mut p_dot = 1.0 - p_wicket - p_extras - scoring_sum;

    // An extreme strike rate can push the dot ball below its floor;
    // shrink the scoring masses to make room.
    if p_dot < MIN_DOT_PROB {
        let available = 1.0 - p_wicket - p_extras - MIN_DOT_PROB;
        let shrink = (available / scoring_sum).max(0.0);
        for (_, p) in scoring.iter_mut() {
            *p *= shrink;
        }
        p_dot = MIN_DOT_PROB;
    }

    let mut table = vec![(Outcome::Runs(0), p_dot), (Outcome::Wicket, p_wicket)];
    table.extend(scoring);
    table.extend([
        (Outcome::Wide(1), params.wide_prob),
        (Outcome::NoBall(1), params.no_ball_prob),
        (Outcome::Bye(1), params.bye_prob),
        (Outcome::LegBye(1), params.leg_bye_prob),
    ]);
    table
}

/// Distribution over dismissal modes for a wicket-taking delivery.
/// Spinners buy stumpings and more catches; pace hits the stumps.
pub fn wicket_type(bowl_type: BowlType) -> Vec<(DismType, f64)> {
    if bowl_type.is_spin() {
        vec![
            (DismType::Bowled, 0.14),
            (DismType::Lbw, 0.18),
            (DismType::Caught, 0.45),
            (DismType::CaughtBowled, 0.05),
            (DismType::RunOut, 0.05),
            (DismType::Stumped, 0.13),
        ]
    } else {
        vec![
            (DismType::Bowled, 0.22),
            (DismType::Lbw, 0.20),
            (DismType::Caught, 0.48),
            (DismType::CaughtBowled, 0.04),
            (DismType::RunOut, 0.06),
        ]
    }
}

/// Probability the toss winner fields first. On a spinning pitch batting
/// first is the percentage call, so the probability of fielding falls as
/// the spin factor rises.
pub fn toss_elect(spin_factor: f64, params: &SimParams) -> f64 {
    1.0 / (1.0 + (params.toss_spin_rate * (spin_factor - 1.0)).exp())
}

/// Probability of enforcing the follow-on with the given first-innings
/// lead. Zero below the threshold, logistic above it.
pub fn follow_on(lead: i32, params: &SimParams) -> f64 {
    if lead < params.follow_on_threshold {
        return 0.0;
    }
    1.0 / (1.0 + (-params.follow_on_rate * (f64::from(lead) - params.follow_on_midpoint)).exp())
}

/// Sample from a probability table.
pub fn sample<T: Copy>(table: &[(T, f64)], rng: &mut impl Rng) -> Result<T> {
    let index =
        WeightedIndex::new(table.iter().map(|(_, p)| *p)).map_err(|e| MatchError::Simulation {
            message: format!("invalid probability table: {e}"),
        })?;
    Ok(table[index.sample(rng)].0)
}

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_min_count, validate_positive, validate_probability, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable constants of the simulation models.
///
/// Defaults are the values the engine was calibrated with. A TOML file can
/// override any subset of fields; everything else keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    // Fatigue model: per-ball increments are sampled from a normal
    // distribution with these means; spinners tire much more slowly.
    pub pace_fatigue_mean: f64,
    pub spin_fatigue_mean: f64,
    /// Added to the per-ball mean for genuinely fast bowling (f, fm).
    pub extra_pace_penalty: f64,
    pub fatigue_std: f64,
    /// A wicket lifts the bowler: subtracted from accumulated fatigue.
    pub wicket_relief: f64,
    /// Fatigue recovered for each over spent off the attack.
    pub rest_recovery: f64,

    // Bowling changes. Take-off probability is logistic in fatigue.
    pub takeoff_midpoint: f64,
    pub takeoff_rate: f64,
    /// Multiplier on take-off pressure for part-time bowlers.
    pub part_time_takeoff_factor: f64,
    /// Over at which the second new ball becomes due.
    pub new_ball_over: u32,

    // Fielding: share of catches that go to the keeper.
    pub wk_catch_prob: f64,

    // Toss election and follow-on models.
    pub toss_spin_rate: f64,
    /// Minimum lead before the follow-on is considered at all.
    pub follow_on_threshold: i32,
    pub follow_on_midpoint: f64,
    pub follow_on_rate: f64,

    // Delivery model anchors.
    pub reference_bat_avg: f64,
    pub reference_bat_sr: f64,
    pub wide_prob: f64,
    pub no_ball_prob: f64,
    pub bye_prob: f64,
    pub leg_bye_prob: f64,

    // Match clock.
    pub overs_per_day: u32,
    pub days: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            pace_fatigue_mean: 3.5,
            spin_fatigue_mean: 1.4,
            extra_pace_penalty: 0.7,
            fatigue_std: 0.6,
            wicket_relief: 15.0,
            rest_recovery: 8.0,
            takeoff_midpoint: 180.0,
            takeoff_rate: 0.2,
            part_time_takeoff_factor: 5.0,
            new_ball_over: 80,
            wk_catch_prob: 0.5,
            toss_spin_rate: 4.0,
            follow_on_threshold: 200,
            follow_on_midpoint: 250.0,
            follow_on_rate: 0.02,
            reference_bat_avg: 35.0,
            reference_bat_sr: 55.0,
            wide_prob: 0.015,
            no_ball_prob: 0.01,
            bye_prob: 0.005,
            leg_bye_prob: 0.01,
            overs_per_day: 90,
            days: 5,
        }
    }
}

impl SimParams {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let params: SimParams = toml::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }
}

impl Validate for SimParams {
    fn validate(&self) -> Result<()> {
        validate_probability("wk_catch_prob", self.wk_catch_prob)?;
        validate_probability("wide_prob", self.wide_prob)?;
        validate_probability("no_ball_prob", self.no_ball_prob)?;
        validate_probability("bye_prob", self.bye_prob)?;
        validate_probability("leg_bye_prob", self.leg_bye_prob)?;
        validate_positive("pace_fatigue_mean", self.pace_fatigue_mean)?;
        validate_positive("spin_fatigue_mean", self.spin_fatigue_mean)?;
        validate_positive("fatigue_std", self.fatigue_std)?;
        validate_positive("rest_recovery", self.rest_recovery)?;
        validate_positive("takeoff_rate", self.takeoff_rate)?;
        validate_positive("part_time_takeoff_factor", self.part_time_takeoff_factor)?;
        validate_positive("reference_bat_avg", self.reference_bat_avg)?;
        validate_positive("reference_bat_sr", self.reference_bat_sr)?;
        validate_min_count("overs_per_day", self.overs_per_day, 1)?;
        validate_min_count("days", self.days, 1)?;
        validate_min_count("new_ball_over", self.new_ball_over, 1)?;
        Ok(())
    }
}

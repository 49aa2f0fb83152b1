use crate::config::SimParams;
use serde::{Deserialize, Serialize};

/// The match clock: a test runs for a bounded number of overs a day over
/// a bounded number of days. When the final day's allocation is bowled,
/// any innings still open is a draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchClock {
    day: u32,
    overs_today: u32,
    overs_per_day: u32,
    days: u32,
}

impl MatchClock {
    pub fn new(params: &SimParams) -> Self {
        Self {
            day: 1,
            overs_today: 0,
            overs_per_day: params.overs_per_day,
            days: params.days,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn overs_today(&self) -> u32 {
        self.overs_today
    }

    /// Advance by one completed over.
    pub fn tick_over(&mut self) {
        if self.expired() {
            return;
        }
        self.overs_today += 1;
        if self.overs_today >= self.overs_per_day {
            tracing::info!(day = self.day, "close of play");
            self.day += 1;
            self.overs_today = 0;
        }
    }

    /// Out of match time: the final day's overs are all bowled.
    pub fn expired(&self) -> bool {
        self.day > self.days
    }
}

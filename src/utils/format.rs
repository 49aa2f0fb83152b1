//! Scorecard formatting helpers.

/// Ordinal suffix for innings numbers: "1st", "2nd", "3rd", "4th".
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Split a ball count into completed overs and remaining balls.
pub fn balls_to_overs(balls: u32) -> (u32, u32) {
    (balls / 6, balls % 6)
}

/// Overs in scorebook notation: "14" for exactly 14 overs, "14.3" otherwise.
pub fn overs_str(balls: u32) -> String {
    let (overs, rem) = balls_to_overs(balls);
    if rem == 0 {
        overs.to_string()
    } else {
        format!("{overs}.{rem}")
    }
}

/// A strike rate or economy figure to two decimal places, "-" when there
/// is no denominator yet.
pub fn rate_str(numer: f64, denom: f64) -> String {
    if denom == 0.0 {
        "-".to_string()
    } else {
        format!("{:.2}", numer / denom)
    }
}

use crate::utils::error::{MatchError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_probability(field_name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(MatchError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Probability must be between 0 and 1".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    if !(value > 0.0) {
        return Err(MatchError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be positive".to_string(),
        });
    }
    Ok(())
}

pub fn validate_min_count(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(MatchError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {min_value}"),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MatchError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_probability() {
        assert!(validate_probability("wk_catch_prob", 0.5).is_ok());
        assert!(validate_probability("wk_catch_prob", 0.0).is_ok());
        assert!(validate_probability("wk_catch_prob", 1.0).is_ok());
        assert!(validate_probability("wk_catch_prob", 1.5).is_err());
        assert!(validate_probability("wk_catch_prob", -0.1).is_err());
        assert!(validate_probability("wk_catch_prob", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("fatigue_std", 0.6).is_ok());
        assert!(validate_positive("fatigue_std", 0.0).is_err());
        assert!(validate_positive("fatigue_std", -2.0).is_err());
    }

    #[test]
    fn test_validate_min_count() {
        assert!(validate_min_count("overs_per_day", 90, 1).is_ok());
        assert!(validate_min_count("overs_per_day", 0, 1).is_err());
    }
}

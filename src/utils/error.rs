use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unrecognised {kind}: {value}")]
    Parse { kind: String, value: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Simulation error: {message}")]
    Simulation { message: String },
}

pub type Result<T> = std::result::Result<T, MatchError>;

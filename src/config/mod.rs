pub mod params;

pub use params::SimParams;

#[cfg(feature = "cli")]
mod cli {
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_min_count, validate_path, Validate};
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "testmatch")]
    #[command(about = "Simulate a test match between two playing XIs")]
    pub struct CliConfig {
        /// Home team file (JSON)
        #[arg(long)]
        pub home: String,

        /// Away team file (JSON)
        #[arg(long)]
        pub away: String,

        /// Venue file (JSON); a neutral pitch is assumed if omitted
        #[arg(long)]
        pub venue: Option<String>,

        /// Model parameter file (TOML); defaults are used if omitted
        #[arg(long)]
        pub params: Option<String>,

        /// Number of matches to simulate
        #[arg(long, default_value = "1")]
        pub matches: u32,

        /// RNG seed for reproducible simulations
        #[arg(long)]
        pub seed: Option<u64>,

        /// Directory for scorecard/result JSON output
        #[arg(long)]
        pub output: Option<String>,

        /// Only print match results, not full scorecards
        #[arg(long)]
        pub quiet: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("home", &self.home)?;
            validate_path("away", &self.away)?;
            if let Some(venue) = &self.venue {
                validate_path("venue", venue)?;
            }
            if let Some(params) = &self.params {
                validate_path("params", params)?;
            }
            if let Some(output) = &self.output {
                validate_path("output", output)?;
            }
            validate_min_count("matches", self.matches, 1)?;
            Ok(())
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

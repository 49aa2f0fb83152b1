use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use testmatch::adapters;
use testmatch::domain::pregame::{PitchFactors, Pregame, Venue};
use testmatch::utils::{logger, validation::Validate};
use testmatch::{CliConfig, Match, SimParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting testmatch CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    match run(&config) {
        Ok(()) => {
            tracing::info!("Simulation completed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Simulation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn run(config: &CliConfig) -> testmatch::Result<()> {
    let home_team = adapters::load_team(&config.home)?;
    let away_team = adapters::load_team(&config.away)?;

    let venue = match &config.venue {
        Some(path) => adapters::load_json::<Venue>(path)?,
        None => Venue {
            name: "Neutral Ground".to_string(),
            city: String::new(),
            country: String::new(),
            pitch_factors: PitchFactors::default(),
        },
    };

    let params = match &config.params {
        Some(path) => SimParams::from_file(path)?,
        None => SimParams::default(),
    };

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pregame = Pregame {
        home_team,
        away_team,
        venue,
    };

    let mut tally: BTreeMap<String, u32> = BTreeMap::new();

    for match_no in 1..=config.matches {
        let mut game = Match::new(pregame.clone(), params.clone())?;
        let result = game.run(&mut rng)?.clone();

        if config.matches > 1 {
            println!("Match {match_no}: {result}");
        } else {
            println!("{}", game.toss().map(ToString::to_string).unwrap_or_default());
            println!("{result}");
        }

        if !config.quiet {
            for card in game.scorecards() {
                println!("{card}");
            }
        }

        let key = result
            .winner
            .clone()
            .unwrap_or_else(|| "drawn/tied".to_string());
        *tally.entry(key).or_default() += 1;

        if let Some(output) = &config.output {
            let report = game.report()?;
            let path = format!("{output}/match_{match_no}.json");
            adapters::dump_json(&report, &path)?;
            tracing::info!("Report saved to: {}", path);
        }
    }

    if config.matches > 1 {
        println!("\nResults over {} matches:", config.matches);
        for (team, wins) in &tally {
            println!("  {team}: {wins}");
        }
    }

    Ok(())
}

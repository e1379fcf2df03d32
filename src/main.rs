use anyhow::Context;
use clap::Parser;
use controlgp::config::ConfigManager;
use controlgp::engines::generation::SeededRandom;
use controlgp::{GpContext, Individual, IndividualType};
use rayon::prelude::*;
use std::path::PathBuf;

/// Generate or inspect control-law individuals.
#[derive(Parser, Debug)]
#[command(name = "controlgp", version)]
struct Cli {
    /// TOML or JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base seed; individual `i` uses `seed + i`.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of individuals to generate.
    #[arg(long, default_value_t = 1)]
    count: u64,

    /// Generation type, 0 (grow) to 4 (single terminal).
    #[arg(long = "type", default_value_t = 3)]
    kind: u8,

    /// Parse and score this `(root ...)` expression instead of generating.
    #[arg(long)]
    parse: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let manager = ConfigManager::new();
    if let Some(path) = &cli.config {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }
    let config = manager.get();

    if let Some(text) = &cli.parse {
        let ctx = GpContext::new(config, SeededRandom::new(cli.seed))?;
        let individual = Individual::from_text(text, &ctx)?;
        println!("{}", serde_json::to_string(&individual)?);
        return Ok(());
    }

    let kind = IndividualType::try_from(cli.kind)?;
    let base = cli.seed;

    // One context per individual: runs never share a random source.
    let individuals = (0..cli.count)
        .into_par_iter()
        .map(|i| {
            let rng = SeededRandom::new(base.map(|seed| seed.wrapping_add(i)));
            let mut ctx = GpContext::new(config.clone(), rng)?;
            Individual::generate(kind, &mut ctx)
        })
        .collect::<controlgp::Result<Vec<_>>>()?;

    for individual in &individuals {
        println!("{}", serde_json::to_string(individual)?);
    }
    log::info!("generated {} individuals of type {:?}", individuals.len(), kind);
    Ok(())
}

/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Command Line Interface (CLI) module
//!
//! A thin driver around the stochastic pattern generator: it loads the
//! starting structures and the site geometry JSON produced by the site
//! provider, then runs generation with the requested species and actions.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::atoms::AtomicStructure;
use crate::io::{load_site_geometry, read_trajectory};
use crate::pattern::{
    Action, PatternGeneratorConfig, RunOptions, StochasticPatternGenerator,
};

/// Stochastic adsorbate coverage pattern generation
#[derive(Parser, Debug)]
#[command(name = "acat-rs", version, about)]
pub struct Cli {
    /// Input structure archive; every frame becomes a starting image
    pub structure: PathBuf,

    /// Site geometry JSON from the site provider
    pub sites: PathBuf,

    /// Adsorbate species to place, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub species: Vec<String>,

    /// Number of accepted patterns to generate
    #[arg(long, default_value_t = 10)]
    pub n_gen: usize,

    /// Actions to sample from, comma separated
    #[arg(long, value_delimiter = ',', default_value = "add,remove,move")]
    pub actions: Vec<String>,

    /// Minimum inter-adsorbate atomic distance (in Å)
    #[arg(long, default_value_t = 1.5)]
    pub min_adsorbate_distance: f64,

    /// Maximum site-to-atom bonding distance (in Å)
    #[arg(long, default_value_t = 2.5)]
    pub dmax: f64,

    /// Output structure archive
    #[arg(long, default_value = "patterns.traj")]
    pub trajectory: PathBuf,

    /// Append to the output archive instead of overwriting it
    #[arg(long)]
    pub append: bool,

    /// Trial log file
    #[arg(long, default_value = "patterns.log")]
    pub logfile: PathBuf,

    /// Accept duplicate patterns instead of discarding them
    #[arg(long)]
    pub no_unique: bool,

    /// Stop after this many trials even if n-gen is not reached
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Runs the CLI
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let images: Vec<AtomicStructure> = read_trajectory(&cli.structure)
        .with_context(|| format!("reading structures from {}", cli.structure.display()))?
        .into_iter()
        .map(|(structure, _)| structure)
        .collect();
    let geometry = load_site_geometry(&cli.sites)
        .with_context(|| format!("reading site geometry from {}", cli.sites.display()))?;
    let actions: Vec<Action> = cli
        .actions
        .iter()
        .map(|a| a.parse())
        .collect::<Result<_, _>>()?;

    let config = PatternGeneratorConfig {
        adsorbate_species: cli.species.clone(),
        min_adsorbate_distance: cli.min_adsorbate_distance,
        dmax: cli.dmax,
        trajectory: cli.trajectory.clone(),
        append_trajectory: cli.append,
        logfile: Some(cli.logfile.clone()),
        seed: cli.seed,
        ..PatternGeneratorConfig::default()
    };
    let mut generator = StochasticPatternGenerator::new(images, geometry, config)?;
    let summary = generator.run(&RunOptions {
        n_gen: cli.n_gen,
        actions,
        action_probabilities: None,
        unique: !cli.no_unique,
        max_attempts: cli.max_attempts,
    })?;

    log::info!(
        "generated {} patterns in {} attempts",
        summary.n_generated,
        summary.n_attempts
    );
    println!(
        "Generated {} patterns ({} attempts) -> {}",
        summary.n_generated,
        summary.n_attempts,
        cli.trajectory.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_defaults() {
        let cli = Cli::parse_from([
            "acat-rs",
            "slab.traj",
            "sites.json",
            "--species",
            "CO,OH",
        ]);
        assert_eq!(cli.species, vec!["CO".to_string(), "OH".to_string()]);
        assert_eq!(cli.n_gen, 10);
        assert_eq!(cli.actions, vec!["add", "remove", "move"]);
        assert!(!cli.append);
    }
}

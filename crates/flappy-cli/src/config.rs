use std::path::PathBuf;

use anyhow::Context as _;
use flappy_engine::{Seed, WorldConfig};
use flappy_training::config::TrainingConfig;
use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::util;

/// Everything a run is built from. Loaded from `--config`, then overridden by flags.
///
/// ```json
/// {
///   "world": { "pipe_gap": 220 },
///   "training": { "population_size": 100 },
///   "seed": "000102030405060708090a0b0c0d0e0f"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub world: WorldConfig,
    pub training: TrainingConfig,
    pub seed: Option<Seed>,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArg {
    /// JSON file with `world`, `training` and `seed` sections (all optional)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed as 32 hex digits; random if omitted
    #[arg(long)]
    seed: Option<Seed>,
    /// Number of agents per generation
    #[arg(long)]
    population: Option<usize>,
    /// End a generation after this many ticks even if agents survive
    #[arg(long)]
    tick_limit: Option<u64>,
}

impl ConfigArg {
    /// Loads and validates the configuration, drawing a seed if none was given.
    pub fn load(&self) -> anyhow::Result<(RunConfig, Seed)> {
        let mut config: RunConfig = match &self.config {
            Some(path) => util::load_json("config", path)?,
            None => RunConfig::default(),
        };
        self.apply(&mut config);
        config.world.validate().context("Invalid world configuration")?;
        config
            .training
            .validate()
            .context("Invalid training configuration")?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Ok((config, seed))
    }

    fn apply(&self, config: &mut RunConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(population) = self.population {
            config.training.population_size = population;
        }
        if let Some(tick_limit) = self.tick_limit {
            config.training.tick_limit = Some(tick_limit);
        }
    }
}

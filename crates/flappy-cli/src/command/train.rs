use std::path::PathBuf;

use flappy_engine::{Seed, WorldConfig};
use flappy_training::{
    config::TrainingConfig,
    population::{GenerationSummary, PopulationManager},
};
use serde::Serialize;

use crate::{config::ConfigArg, util::JsonSink};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    #[clap(flatten)]
    config: ConfigArg,
    /// Number of generations to run
    #[arg(long, default_value_t = 50)]
    generations: u32,
    /// Report file path (JSON); stdout if omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Statistics of a training run. Weights are not part of it.
#[derive(Debug, Serialize)]
struct TrainingReport {
    seed: Seed,
    world: WorldConfig,
    training: TrainingConfig,
    generations: Vec<GenerationSummary>,
}

/// Runs `generations` generations, printing one line per generation to stderr.
pub(crate) fn train(
    manager: &mut PopulationManager,
    generations: u32,
) -> Vec<GenerationSummary> {
    (0..generations)
        .map(|_| {
            let summary = manager.run_generation();
            eprintln!(
                "Generation #{:<4} best {:>6} ticks (agent {:>3}) | mean {:>8.1} | median {:>6} | score {:>3} | step {:.4}",
                summary.generation,
                summary.best_lifetime,
                summary.best_index,
                summary.lifetimes.mean,
                summary.lifetimes.median,
                summary.score,
                summary.mutation_step,
            );
            summary
        })
        .collect()
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        config,
        generations,
        output,
    } = arg;
    let (config, seed) = config.load()?;
    eprintln!(
        "Training {} agents for {generations} generations (seed {seed})",
        config.training.population_size
    );

    let mut manager = PopulationManager::new(config.world.clone(), config.training.clone(), seed)?;
    let summaries = train(&mut manager, *generations);

    if let Some(best) = summaries.iter().max_by_key(|s| s.best_lifetime) {
        eprintln!();
        eprintln!("Training completed");
        eprintln!(
            "  Longest flight: {} ticks (generation #{})",
            best.best_lifetime, best.generation
        );
        eprintln!("  Highest score:  {}", summaries.iter().map(|s| s.score).max().unwrap_or(0));
    }

    let report = TrainingReport {
        seed,
        world: config.world,
        training: config.training,
        generations: summaries,
    };
    JsonSink::open(output.as_deref())?.write(&report)?;
    if let Some(path) = output {
        eprintln!("Report saved to {}", path.display());
    }
    Ok(())
}

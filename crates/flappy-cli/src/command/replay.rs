use anyhow::Context as _;
use flappy_training::{
    mode::{GameMode, ReplaySession},
    population::PopulationManager,
};
use rand::Rng as _;

use crate::{
    command::{simulation::SimulationApp, train},
    config::ConfigArg,
    tui::Tui,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    #[clap(flatten)]
    config: ConfigArg,
    /// Generations to train before the replay
    #[arg(long, default_value_t = 20)]
    generations: u32,
    /// Let the best agent fly alone
    #[arg(long)]
    solo: bool,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg {
        config,
        generations,
        solo,
    } = arg;
    let (config, seed) = config.load()?;
    anyhow::ensure!(*generations > 0, "at least one generation is needed to pick a best agent");

    eprintln!("Training for {generations} generations (seed {seed})...");
    let mut manager = PopulationManager::new(config.world.clone(), config.training.clone(), seed)?;
    train::train(&mut manager, *generations);
    let best = manager
        .best_agent()
        .context("no generation has finished")?;
    eprintln!("Replaying an agent that survived {} ticks", best.lifetime_ticks());

    // a fresh layout, so the agent cannot rely on the course it was selected on
    let course_seed = rand::rng().random();
    let session = ReplaySession::new(
        config.world,
        config.training,
        *best.genome(),
        course_seed,
        !solo,
    )?;
    let mut app = SimulationApp::new(GameMode::BestAgentReplay(session));
    Tui::new().run(&mut app)?;

    eprintln!("Score: {} (course seed {course_seed})", app.status().score);
    Ok(())
}

use flappy_training::{mode::GameMode, population::PopulationManager};

use crate::{command::simulation::SimulationApp, config::ConfigArg, tui::Tui};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct WatchArg {
    #[clap(flatten)]
    config: ConfigArg,
}

pub(crate) fn run(arg: &WatchArg) -> anyhow::Result<()> {
    let (config, seed) = arg.config.load()?;
    let manager = PopulationManager::new(config.world, config.training, seed)?;

    let mut app = SimulationApp::new(GameMode::Training(Box::new(manager)));
    Tui::new().run(&mut app)?;

    if let Some(generation) = app.status().generation {
        eprintln!("Stopped at generation #{generation} (seed {seed})");
    }
    Ok(())
}

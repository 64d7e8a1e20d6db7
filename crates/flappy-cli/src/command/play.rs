use flappy_training::mode::{GameMode, ManualSession};

use crate::{
    command::simulation::SimulationApp,
    config::ConfigArg,
    tui::Tui,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    config: ConfigArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let (config, seed) = arg.config.load()?;
    let session = ManualSession::new(config.world, seed)?;
    tracing::info!(%seed, "starting manual play");

    let mut app = SimulationApp::new(GameMode::ManualPlay(session));
    Tui::new().run(&mut app)?;

    eprintln!("Score: {} (seed {seed})", app.status().score);
    Ok(())
}

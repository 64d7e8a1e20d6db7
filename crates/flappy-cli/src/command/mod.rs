use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{play::PlayArg, replay::ReplayArg, train::TrainArg, watch::WatchArg};

mod play;
mod replay;
mod simulation;
mod train;
mod watch;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Fly a single bird yourself
    Play(#[clap(flatten)] PlayArg),
    /// Train headless and report per-generation statistics
    Train(#[clap(flatten)] TrainArg),
    /// Watch a population learn
    Watch(#[clap(flatten)] WatchArg),
    /// Train headless, then fly against the best agent
    Replay(#[clap(flatten)] ReplayArg),
}

impl Mode {
    /// Log filter used when `RUST_LOG` is unset. Terminal views keep the screen clean.
    fn default_log_filter(&self) -> &'static str {
        match self {
            Mode::Train(_) => "info",
            Mode::Play(_) | Mode::Watch(_) | Mode::Replay(_) => "error",
        }
    }
}

/// Installs the global stderr subscriber. `RUST_LOG` overrides `default_filter`.
fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install the log subscriber: {err}"))
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play(PlayArg::default()));
    init_tracing(mode.default_log_filter())?;
    match mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Watch(arg) => watch::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
    }
    Ok(())
}

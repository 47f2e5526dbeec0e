use clap::{Parser, Subcommand};
use tracing_subscriber::filter::EnvFilter;

use self::{play::PlayArg, print_config::PrintConfigArg};

mod play;
mod print_config;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a match over stdin/stdout
    Play(#[clap(flatten)] PlayArg),
    /// Print the evaluator configuration as JSON
    PrintConfig(#[clap(flatten)] PrintConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    // stdout carries the commands; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::PrintConfig(arg) => print_config::run(&arg)?,
    }
    Ok(())
}

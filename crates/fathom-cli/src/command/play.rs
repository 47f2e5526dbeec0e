use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context;
use fathom_engine::GameState;
use fathom_evaluator::strategy::{Strategy, StrategyKind};

use crate::{
    protocol::{self, TokenReader},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Decision strategy: `greedy` or `route`
    #[arg(long, default_value = "greedy")]
    strategy: StrategyKind,
    /// Evaluator configuration file (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { strategy, config } = arg;
    let config = util::load_config(config.as_deref())?;
    let strategy = strategy.build(&config);
    tracing::info!(?strategy, "match starting");

    let turns = play_match(strategy.as_ref(), io::stdin().lock(), io::stdout().lock())?;
    tracing::info!(turns, "input closed, match over");
    Ok(())
}

/// Reads the roster, then answers every snapshot until the input ends.
///
/// Returns the number of turns played.
fn play_match<R, W>(strategy: &dyn Strategy, input: R, mut output: W) -> anyhow::Result<u32>
where
    R: BufRead,
    W: Write,
{
    let mut reader = TokenReader::new(input);
    let roster = protocol::read_roster(&mut reader).context("Failed to read creature roster")?;
    let mut state = GameState::from_roster(&roster).context("Invalid creature roster")?;

    while !reader.is_exhausted()? {
        let turn = state.turn() + 1;
        let snapshot = protocol::read_snapshot(&mut reader)
            .with_context(|| format!("Failed to read snapshot of turn {turn}"))?;
        state
            .apply_snapshot(&snapshot)
            .with_context(|| format!("Invalid snapshot on turn {turn}"))?;
        let plan = strategy
            .play_turn(&mut state)
            .with_context(|| format!("Failed to decide turn {turn}"))?;

        for (_, action) in plan.actions() {
            writeln!(output, "{action}").context("Failed to write drone action")?;
        }
        output.flush().context("Failed to flush drone actions")?;
    }
    Ok(state.turn())
}

#[cfg(test)]
mod tests {
    use fathom_evaluator::{config::EvaluatorConfig, route::RouteStrategy};

    use super::*;

    const ROSTER: &str = "2\n4 0 0\n16 -1 -1\n";

    /// One drone of mine at (5000, 9000) with a fish straight above it.
    const TURN: &str = "\
        0\n0\n0\n0\n\
        1\n0 5000 9000 0 30\n\
        1\n1 9000 500 0 30\n\
        0\n\
        1\n4 5000 3000 0 0\n\
        0\n";

    fn run_with(strategy: &dyn Strategy, input: &str) -> anyhow::Result<(u32, String)> {
        let mut output = Vec::new();
        let turns = play_match(strategy, input.as_bytes(), &mut output)?;
        Ok((turns, String::from_utf8(output)?))
    }

    #[test]
    fn test_greedy_match() {
        let strategy = StrategyKind::Greedy.build(&EvaluatorConfig::default());
        let input = format!("{ROSTER}{TURN}{TURN}");
        let (turns, output) = run_with(strategy.as_ref(), &input).unwrap();
        assert_eq!(turns, 2);
        // A full battery keeps the light on.
        assert_eq!(output, "MOVE 5000 8400 1\nMOVE 5000 8400 1\n");
    }

    #[test]
    fn test_route_match() {
        let strategy = RouteStrategy::new(&EvaluatorConfig::default());
        let input = format!("{ROSTER}{TURN}");
        let (_, output) = run_with(&strategy, &input).unwrap();
        assert_eq!(output, "MOVE 7500 2500 1\n");
    }

    #[test]
    fn test_roster_only_plays_nothing() {
        let strategy = StrategyKind::Greedy.build(&EvaluatorConfig::default());
        let (turns, output) = run_with(strategy.as_ref(), ROSTER).unwrap();
        assert_eq!(turns, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_truncated_turn_is_an_error() {
        let strategy = StrategyKind::Greedy.build(&EvaluatorConfig::default());
        let input = format!("{ROSTER}0\n0\n");
        let error = run_with(strategy.as_ref(), &input).unwrap_err();
        assert!(error.to_string().contains("turn 1"), "{error:#}");
    }
}

use std::path::PathBuf;

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PrintConfigArg {
    /// Configuration to print instead of the defaults (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PrintConfigArg) -> anyhow::Result<()> {
    let PrintConfigArg { config, output } = arg;
    let config = util::load_config(config.as_deref())?;
    util::save_config(&config, output.as_deref())
}

use std::io;

use clap::Parser;
use tracing::debug;

use regime_cli::cli::{self, Cli};
use regime_cli::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    debug!(?cli, "starting");

    let stdout = io::stdout();
    cli::run(&cli, &mut stdout.lock())
}

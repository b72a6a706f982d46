//! CLI entry point for map conversion and card dealing

use clap::Parser;
use maptiles::io::cli::Cli;
use maptiles::io::error::computation_error;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> maptiles::Result<()> {
    let cli = Cli::parse();
    TermLogger::init(
        cli.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| computation_error("logger setup", &e))?;
    cli.run()
}

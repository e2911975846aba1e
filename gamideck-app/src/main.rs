mod api;
mod cli;
mod logging;
mod tui;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()
use tokio::runtime::Runtime;

use cli::commands::{run_cli, run_tui};
use cli::opts::{Cli, Command};

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init(&args.log);

    match &args.cmd {
        // TUI drives its own runtime (no nested Tokio)
        Command::Tui => run_tui(&args),
        _ => {
            let rt = Runtime::new()?;
            rt.block_on(run_cli(args))
        }
    }
}

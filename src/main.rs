use aq_dashboard::cli::{run, Cli};
use aq_dashboard::error::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

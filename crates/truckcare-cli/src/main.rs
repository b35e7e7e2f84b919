//! truckcare - truck maintenance prediction
//!
//! A CLI tool that predicts days until next service from sensor and
//! workshop data, and queries the fleet's service history.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    truckcare_app::logging::init(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

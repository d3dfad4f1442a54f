//! PTCGP trade tools CLI

use clap::Parser;
use colored::*;
use ptcgp_trade_tools::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", "❌ Invalid configuration!".red().bold());
            eprintln!("{}", format!("Error: {:#}", e).red());
            std::process::exit(1);
        }
    };
    config.logging.init();

    if let Err(e) = cli::run(cli, config) {
        eprintln!("{}", "❌ Command failed!".red().bold());
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

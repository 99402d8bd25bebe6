use clap::Parser;
use log::LevelFilter;

use cli::Cli;

mod cli;
mod commands;
mod config;
mod error;
mod input;
mod linalg;
pub mod math;
mod report;
mod solver;
mod utils;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::default()
        .filter_level(level)
        .parse_env(env_logger::Env::default().filter("EIGSORT_LOG"))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&e.describe());
        std::process::exit(1);
    }
}

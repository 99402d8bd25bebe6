//! Coloured status lines. Everything here goes to stderr so that stdout
//! carries only results.

use colored::Colorize;

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

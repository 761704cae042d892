//! # esc
//!
//! Open files in emacs by name, line number and alias.

use clap::Parser;
use esc_cli::{execute, init_logging, load_config, report, AppError, Cli};
use esc_core::config::LoggingPreferences;
use esc_core::ExitSignal;
use std::io;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitSignal::UserError.code()
            } else {
                ExitSignal::Success.code()
            };
        }
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&LoggingPreferences::default());
            return report(&AppError::from(e), &mut io::stderr());
        }
    };
    init_logging(&config.logging);

    match execute(cli, &config, &mut io::stdout(), &mut io::stderr()) {
        Ok(code) => code,
        Err(e) => report(&e, &mut io::stderr()),
    }
}

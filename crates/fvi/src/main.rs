use std::process::ExitCode;

use clap::Parser;
use fvi::app::pipeline::Outcome;

fn main() -> ExitCode {
    let cli = fvi::cli::Cli::parse();
    fvi::init(cli.warn);

    match fvi::run(cli) {
        Ok(outcome) => {
            match outcome {
                Outcome::NotFound => println!("Pattern not found."),
                Outcome::Interrupted => println!("Killed by user."),
                Outcome::Edited(_) => {}
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(err) => {
            eprintln!("fvi: error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

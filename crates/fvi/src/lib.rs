pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

use anyhow::Result;

use crate::app::pipeline::{self, Outcome};
use crate::cli::Cli;
use crate::infra::config::Settings;
use crate::infra::signal;

pub fn init(show_warnings: bool) {
    infra::logging::init(show_warnings);
}

/// Load settings and run the pipeline for parsed arguments.
pub fn run(cli: Cli) -> Result<Outcome> {
    signal::install_handler()?;
    let settings = Settings::load()?;
    pipeline::run(cli.into_request(), &settings, signal::interrupted)
}

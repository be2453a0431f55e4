mod cdf;
mod cli;
mod config;
mod histogram;
mod io;
mod measure;
mod output;
mod plot;
mod process;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let cfg = cli::handle_cli().with_context(|| "Error processing command line arguments")?;
    process::process_figures(&cfg)
}

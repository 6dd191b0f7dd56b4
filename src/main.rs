//! workload-acquire - install a .NET SDK workload by hand
//!
//! Restores a workload manifest package and its packs with `dotnet restore`, moves them into
//! an SDK installation and enables the SDK's workload resolver.

use miette::Diagnostic;

mod cli;
mod commands;
mod common;
mod config;
mod error;
mod installer;
mod manifest;
mod resolver;
mod restore;
mod temp;
mod ui;

use config::Config;
use error::{AcquireError, Result};

fn run(cli: cli::Cli) -> Result<()> {
    let config = Config::from_cli(cli)?;
    commands::acquire::run(&config)
}

fn report(err: &AcquireError) {
    eprintln!("Error: {err}");
    if let Some(help) = err.help() {
        eprintln!("  help: {help}");
    }
}

fn main() {
    let args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());

    let cli = match cli::parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(e) = run(cli) {
        report(&e);
        std::process::exit(1);
    }
}

//! upconf CLI - companion tool for encrypted settings sidecars.
//!
//! Responsibilities:
//! - Author and inspect `.secrets` files (`encrypt` / `decrypt`).
//! - Print the fully resolved settings for the current tree (`show`).
//!
//! Does NOT handle:
//! - Settings resolution or cipher mechanics (see the `upconf` crate).
//!
//! Invariants:
//! - Payloads and JSON documents go to stdout; diagnostics go to stderr, so
//!   output can be piped into files safely.

mod args;
mod commands;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use args::{Cli, Command};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encrypt(args) => commands::encrypt(&args),
        Command::Decrypt(args) => commands::decrypt(&args),
        Command::Show { dir } => commands::show(dir.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

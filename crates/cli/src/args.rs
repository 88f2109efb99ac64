//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "upconf", version, about = "Encrypted settings sidecar tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt a JSON document of dotted-path secrets into the sidecar
    /// format.
    Encrypt(CipherArgs),

    /// Decrypt a secrets sidecar and pretty-print the JSON document.
    Decrypt(CipherArgs),

    /// Resolve, load, and print the fully merged settings.
    Show {
        /// Start the config directory search here instead of the working
        /// directory.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct CipherArgs {
    /// Input file; reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Passphrase; defaults to CONFIG_SECRET, then the environment name.
    #[arg(long)]
    pub key: Option<String>,

    /// Environment name used for the passphrase fallback.
    #[arg(long, env = "APP_ENV")]
    pub env: Option<String>,
}

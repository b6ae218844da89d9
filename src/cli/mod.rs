//! Command-line interface for CineReview, parsed with clap.

mod commands;

use clap::{Parser, Subcommand};

/// CineReview - movie review publishing backend
#[derive(Parser)]
#[command(name = "cinereview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// List movies in the data file
    #[command(alias = "ls", alias = "l")]
    List {
        /// Include drafts
        #[arg(long)]
        all: bool,
    },

    /// Print an Argon2id hash for a password
    HashPassword {
        password: String,
    },
}

pub use commands::*;

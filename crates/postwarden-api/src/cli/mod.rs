//! CLI command definitions for the `postwarden` binary.
//!
//! Uses clap derive macros for argument parsing. Two shells are exposed:
//! the interactive account console and the web form server.

pub mod console;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Manage a social-media account from the terminal.
#[derive(Parser)]
#[command(name = "postwarden", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive account console: connect, manage keywords, scan-and-delete.
    Console,

    /// Start the web form server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

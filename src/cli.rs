// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "netward")]
#[command(about = "Converge cloud VPC networks and their routes to a desired state")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the config file (default: discover netward.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new netward.yml configuration file
    Init {
        /// Cloud project id
        #[arg(short, long)]
        project: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Ensure a network exists, creating it if needed
    Ensure {
        /// Network name
        name: String,

        /// Give up after this many seconds (overrides config)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Ensure a network is gone, deleting its routes first
    Teardown {
        /// Network name
        name: String,

        /// Give up after this many seconds (overrides config)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Show whether a network exists and which routes block its deletion
    Status {
        /// Network name
        name: String,
    },
}

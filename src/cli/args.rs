//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for palate
#[derive(Parser, Debug)]
#[command(
    name = "palate",
    version,
    about = "Customer feedback analysis and kitchen recommendations"
)]
pub struct Cli {
    /// Configuration file path; searched in the working directory and ~/.palate otherwise
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file holding an array of feedback records
    #[arg(long, global = true, default_value = "feedback.json")]
    pub feedback: PathBuf,

    /// Log level override (error, warn, info, debug, trace); RUST_LOG wins if set
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a customer's full feedback history
    Analyze {
        /// Customer identifier
        customer: String,
    },

    /// Produce a kitchen note for an order
    Assess {
        /// Customer identifier
        customer: String,

        /// Ordered item names; use "2x Pad Thai" for quantities
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Analyze a single comment
    Item {
        /// Feedback text
        #[arg(required = true)]
        text: Vec<String>,

        /// What the comment is about, e.g. a dish name
        #[arg(long, default_value = "item")]
        context: String,
    },

    /// Rating statistics only, without external services
    Stats {
        /// Customer identifier
        customer: String,
    },

    /// Write a palate.toml with default settings
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

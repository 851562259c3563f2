//! CLI module for Svar.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Svar - RAG-powered FAQ question answering
///
/// Retrieves the FAQ entries most similar to a question and asks a language
/// model to answer grounded in them. The name "Svar" comes from the
/// Norwegian word for "answer."
#[derive(Parser, Debug)]
#[command(name = "svar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a question and get an answer grounded in the FAQ corpus
    Ask {
        /// The question to ask
        question: String,

        /// Number of FAQ entries to retrieve as context
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Chat model to use for answer generation
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show the FAQ entries most similar to a query, with scores
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "3")]
        limit: usize,
    },

    /// Summarize a previously generated answer
    Summarize {
        /// The answer text to summarize
        answer: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

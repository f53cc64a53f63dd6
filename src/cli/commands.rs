//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Schema-inferring HTTP API test CLI
#[derive(Parser, Debug)]
#[command(name = "rest-instance")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Session configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Perform one exchange and print the recorded instances
    Call {
        /// HTTP method (GET, POST, ...)
        method: String,

        /// Endpoint, relative to the base URL or absolute
        endpoint: String,

        /// Base URL (overrides the config file)
        #[arg(long)]
        url: Option<String>,

        /// Query parameters as a JSON object or JSON file
        #[arg(long)]
        query: Option<String>,

        /// Request body as JSON, a JSON file or plain text
        #[arg(long)]
        body: Option<String>,

        /// Extra header as `Name: value` (repeatable)
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,

        /// Response expectations as a JSON object or JSON file
        #[arg(long)]
        expect_response: Option<String>,

        /// API spec to validate the exchange against
        #[arg(long)]
        spec: Option<String>,

        /// Write the instances to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the schema inferred from a JSON value
    Infer {
        /// JSON file, inline JSON, or `-` for stdin
        input: String,
    },

    /// Validate a JSON value against a schema
    Validate {
        /// Schema file (JSON)
        #[arg(long)]
        schema: PathBuf,

        /// JSON file, inline JSON, or `-` for stdin
        input: String,
    },
}

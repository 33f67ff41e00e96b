use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Evaluate building aware propagation loss between scenario nodes.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON scenario describing model parameters, buildings and
    /// nodes.
    #[arg(short, long)]
    pub scenario: PathBuf,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the model branch and loss between two nodes.
    Pair {
        /// Name of the first node.
        a: String,

        /// Name of the second node.
        b: String,
    },

    /// Print the loss between every ordered pair of nodes.
    Matrix {
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Maximum-flow analysis for capacitated networks", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input selection shared by every subcommand.
#[derive(Args, Debug)]
pub struct NetworkArgs {
    /// Network file (.max/.dimacs for DIMACS max-flow, .csv for arc lists)
    pub network: PathBuf,

    /// Source node name (required for .csv inputs, which carry no terminals)
    #[arg(long)]
    pub source: Option<String>,

    /// Sink node name (required for .csv inputs)
    #[arg(long)]
    pub sink: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the maximum-flow problem and report per-arc flows
    Solve {
        #[command(flatten)]
        input: NetworkArgs,

        /// LP backend to run
        #[arg(long, default_value = "clarabel")]
        solver: String,

        /// Write per-arc flows to a CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Write the full solution to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Parse and validate a network, then print its statistics
    Check {
        #[command(flatten)]
        input: NetworkArgs,

        /// Write the topology as Graphviz DOT to a file
        #[arg(long)]
        dot: Option<PathBuf>,
    },
    /// Print the assembled linear program in LP-style text
    Model {
        #[command(flatten)]
        input: NetworkArgs,
    },
}

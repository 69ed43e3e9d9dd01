use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crashline")]
#[command(about = "Re-render and inspect traceback reports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse previously rendered traceback text and render it again
    Render {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,

        /// Emit the structured (JSON) form instead of text
        #[arg(long)]
        json: bool,

        /// Keep only frames under the local-code root
        #[arg(long)]
        local_only: bool,

        /// Drop frames whose location matches this pattern (repeatable)
        #[arg(long = "exclude", value_name = "PATTERN")]
        exclude: Vec<String>,

        /// Override the detected terminal width
        #[arg(long)]
        width: Option<usize>,

        /// Disable colorized output
        #[arg(long)]
        no_color: bool,

        /// Suppress the alias preamble
        #[arg(long)]
        no_aliases: bool,

        /// Extra registry entries, e.g. --alias '<pwd>=/home/me/project'
        /// (repeatable)
        #[arg(long = "alias", value_name = "TOKEN=PREFIX")]
        alias: Vec<String>,
    },

    /// Render a built-in chained sample, for eyeballing the pipeline
    Demo {
        /// Emit the structured (JSON) form instead of text
        #[arg(long)]
        json: bool,

        /// Keep only frames under the local-code root
        #[arg(long)]
        local_only: bool,

        /// Drop frames whose location matches this pattern (repeatable)
        #[arg(long = "exclude", value_name = "PATTERN")]
        exclude: Vec<String>,

        /// Override the detected terminal width
        #[arg(long)]
        width: Option<usize>,

        /// Disable colorized output
        #[arg(long)]
        no_color: bool,
    },
}

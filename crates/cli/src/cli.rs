//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::Parser;

use crate::color::ColorMode;

/// Sync dependencies and run the test suite of every service
#[derive(Parser)]
#[command(name = "svctest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repository root (default: nearest ancestor with a services directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Use specific config file
    #[arg(short = 'C', long = "config", env = "SVCTEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run only the named service (repeatable)
    #[arg(short, long = "service", value_name = "NAME")]
    pub services: Vec<String>,

    /// Run services in lexicographic order
    #[arg(long)]
    pub sorted: bool,

    /// Skip the dependency sync step
    #[arg(long)]
    pub no_sync: bool,

    /// List discovered services and exit
    #[arg(long)]
    pub list: bool,

    /// Summary format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

use crate::core::WcagLevel;
use crate::io::output::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MinLevel {
    A,
    Aa,
    Aaa,
}

impl From<MinLevel> for WcagLevel {
    fn from(level: MinLevel) -> Self {
        match level {
            MinLevel::A => WcagLevel::A,
            MinLevel::Aa => WcagLevel::AA,
            MinLevel::Aaa => WcagLevel::AAA,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "readymap")]
#[command(about = "Production-readiness audit for JavaScript/TypeScript web codebases", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit a codebase and produce a readiness report
    Audit {
        /// Path to audit
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the cyclomatic complexity threshold
        #[arg(long)]
        max_cyclomatic: Option<u32>,

        /// Override the function length threshold (lines)
        #[arg(long)]
        max_length: Option<usize>,

        /// Override the nesting depth threshold
        #[arg(long)]
        max_nesting: Option<u32>,

        /// Override the parameter count threshold
        #[arg(long)]
        max_parameters: Option<usize>,

        /// Override the total bundle size budget in bytes
        #[arg(long)]
        max_bundle_bytes: Option<u64>,

        /// Minimum WCAG conformance level to enforce
        #[arg(long, value_enum)]
        min_level: Option<MinLevel>,

        /// Phases to skip (complexity, security, compliance, performance)
        #[arg(long = "skip", value_delimiter = ',')]
        skip_phases: Vec<String>,

        /// Exit non-zero when the overall score falls below this value
        #[arg(long)]
        fail_under: Option<f64>,

        /// Run phases sequentially instead of in parallel
        #[arg(long)]
        no_parallel: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,

        /// Increase verbosity (repeatable)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default readymap.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_defaults_parse() {
        let cli = Cli::try_parse_from(["readymap", "audit", "."]).unwrap();
        match cli.command {
            Commands::Audit {
                format,
                max_cyclomatic,
                fail_under,
                ..
            } => {
                assert_eq!(format, OutputFormat::Terminal);
                assert!(max_cyclomatic.is_none());
                assert!(fail_under.is_none());
            }
            _ => panic!("expected audit command"),
        }
    }

    #[test]
    fn skip_list_splits_on_commas() {
        let cli =
            Cli::try_parse_from(["readymap", "audit", ".", "--skip", "performance,compliance"])
                .unwrap();
        match cli.command {
            Commands::Audit { skip_phases, .. } => {
                assert_eq!(skip_phases, vec!["performance", "compliance"]);
            }
            _ => panic!("expected audit command"),
        }
    }
}

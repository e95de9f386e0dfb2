//! CLI command definitions for the `pressroom` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod serve;
pub mod warm;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use pressroom_types::warmup::WarmupSource;

/// Cache revalidation and page warm-up service for the page builder.
#[derive(Parser)]
#[command(name = "pressroom", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (TOML). Missing file means defaults.
    #[arg(long, global = true, env = "PRESSROOM_CONFIG", default_value = "pressroom.toml")]
    pub config: PathBuf,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More log output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Address to bind, overriding `bind_addr` from the config file.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Warm a set of pages once and print the report.
    Warm {
        /// Site origin, e.g. https://www.example.com.
        #[arg(long)]
        base_url: String,

        /// Label used in log lines.
        #[arg(long, value_enum, default_value = "revalidate")]
        source: SourceArg,

        /// Print the report as JSON instead of a summary line.
        #[arg(long)]
        json: bool,

        /// Page paths or slugs ("THEME" and blanks are skipped).
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceArg {
    Revalidate,
    Publish,
}

impl From<SourceArg> for WarmupSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Revalidate => WarmupSource::Revalidate,
            SourceArg::Publish => WarmupSource::Publish,
        }
    }
}

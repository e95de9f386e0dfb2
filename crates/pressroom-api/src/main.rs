//! Pressroom entry point.
//!
//! Binary name: `pressroom`
//!
//! Parses CLI arguments, initializes tracing and configuration, then runs the
//! HTTP server or a one-off command.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use pressroom_infra::config::{apply_env_overrides, load_server_config};
use pressroom_infra::secret::env::read_var;
use pressroom_observe::tracing_setup::{LogFormat, default_directive, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "pressroom", &mut std::io::stdout());
        return Ok(());
    }

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(format, default_directive(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let config = apply_env_overrides(load_server_config(&cli.config).await, read_var);

    let result = match cli.command {
        Commands::Serve { bind } => cli::serve::serve(config, bind).await,
        Commands::Warm {
            base_url,
            source,
            json,
            paths,
        } => cli::warm::warm(&config, &base_url, &paths, source.into(), json).await,
        Commands::Completions { .. } => Ok(()),
    };

    shutdown_tracing();
    result
}

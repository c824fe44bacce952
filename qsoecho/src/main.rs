//! qsoecho - debug echo server for logbook upload clients
//!
//! Accepts ADIF uploads, raw decode messages and radio state reports,
//! traces what arrived and answers `OK`.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qsoecho_core::config::{ConfigLoader, EchoConfig, LogFormat, LoggingConfig};

/// qsoecho - print what a logbook client sends and acknowledge it
#[derive(Parser)]
#[command(name = "qsoecho")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server (default)
    Run {
        /// Address to listen on, overrides the config file
        #[arg(long)]
        listen: Option<String>,

        /// Path to a .json or .toml config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the config file
        config: PathBuf,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Run {
        listen: None,
        config: None,
    });

    match command {
        Commands::Run { listen, config: config_path } => {
            let mut config = match &config_path {
                Some(path) => ConfigLoader::load(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => EchoConfig::default(),
            };
            if let Some(listen) = listen {
                config.listen = listen;
            }
            config.validate()?;

            init_tracing(&config.logging, cli.verbose);
            if cli.verbose {
                tracing::info!("Verbose mode enabled");
            }
            // the subscriber only exists from here on
            match &config_path {
                Some(path) => tracing::info!("Loaded config from {}", path.display()),
                None => tracing::debug!("No config file given, using defaults"),
            }
            tracing::debug!("Effective config: {:?}", config);

            qsoecho_api::run_echo_server(&config).await?;
        }

        Commands::Validate { config } => match ConfigLoader::load(&config) {
            Ok(_) => {
                println!("✅ Configuration '{}' is valid!", config.display());
            }
            Err(e) => {
                eprintln!("❌ Configuration Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Version => {
            println!("qsoecho v{}", qsoecho_core::VERSION);
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let ansi = std::io::stdout().is_terminal();

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Full => registry
            .with(tracing_subscriber::fmt::layer().with_ansi(ansi))
            .init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_ansi(ansi))
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["qsoecho"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_run_listen_override() {
        let cli = Cli::try_parse_from(["qsoecho", "-v", "run", "--listen", "127.0.0.1:9000"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Run { listen, config }) => {
                assert_eq!(listen.as_deref(), Some("127.0.0.1:9000"));
                assert!(config.is_none());
            }
            _ => panic!("expected run"),
        }
    }
}

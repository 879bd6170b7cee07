//! Agent Configs CLI
//!
//! Command-line interface for listing, inspecting and checking config bundles.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use agent_configs::registry::Registry;
use agent_configs::settings::{ExplorationSettings, NetworkSettings, OptimizationSettings, RunSettings};

#[derive(Parser)]
#[command(name = "agent-configs")]
#[command(version, about = "Inspect agent hyperparameter bundles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available bundles
    List,

    /// Print a bundle
    Show {
        /// Bundle name
        name: String,

        /// Override a setting, e.g. --set lr=0.0007 (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate one bundle, or all of them
    Check {
        /// Bundle name (all bundles when omitted)
        name: Option<String>,
    },
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = Registry::standard();

    match cli.command {
        Commands::List => {
            for name in registry.names() {
                let bundle = registry.get(name)?;
                println!("{:<16} {} settings", name, bundle.len());
            }
        }

        Commands::Show { name, overrides, json } => {
            let mut bundle = registry.get(&name)?;
            bundle.apply_overrides(&overrides)?;
            if !overrides.is_empty() {
                tracing::info!(bundle = %name, count = overrides.len(), "applied overrides");
            }

            if json {
                println!("{}", bundle.to_json()?);
            } else {
                print!("{}", bundle);
            }
        }

        Commands::Check { name } => {
            let names: Vec<String> = match name {
                Some(name) => vec![name],
                None => registry.names().into_iter().map(str::to_string).collect(),
            };

            let mut failures = 0;
            for name in &names {
                let bundle = registry.get(name)?;
                match bundle.validate() {
                    Ok(()) => tracing::info!(bundle = %name, "valid"),
                    Err(err) => {
                        failures += 1;
                        tracing::error!(bundle = %name, error = %err, "invalid");
                    }
                }

                // Bundles that define a network should also yield every typed view
                if bundle.contains_key("network") {
                    let views = NetworkSettings::from_bundle(&bundle)
                        .and(OptimizationSettings::from_bundle(&bundle).map(|_| ()))
                        .and(ExplorationSettings::from_bundle(&bundle).map(|_| ()))
                        .and(RunSettings::from_bundle(&bundle).map(|_| ()));
                    if let Err(err) = views {
                        failures += 1;
                        tracing::error!(bundle = %name, error = %err, "incomplete settings");
                    }
                }
            }

            if failures > 0 {
                bail!("{} of {} bundles failed checks", failures, names.len());
            }
            println!("{} bundles ok", names.len());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honours_rust_log() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("agent_configs=trace")).max_level_hint(), Some(LevelFilter::TRACE));
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }
}

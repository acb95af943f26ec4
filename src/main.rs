use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::process::ExitCode;
use token_issuer::{config::Config, GroupValidator, TransactionGroup};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "token-issuer")]
#[command(about = "Eligibility check for token issuance transaction groups")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a transaction group, exit status 0 on ALLOW and 1 on DENY
    Check {
        /// JSON array of transaction records, `-` for stdin
        group: String,

        /// Parameter override: inline YAML/JSON mapping or path to a .toml/.json/.yaml file
        params: Option<String>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective parameters
    Params {
        /// Parameter override: inline YAML/JSON mapping or path to a .toml/.json/.yaml file
        params: Option<String>,
    },
}

/// The main entry point for the token-issuer CLI.
///
/// Loads the optional configuration file, initializes logging, and runs the
/// requested command. A denied group exits with status 1.
fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    // RUST_LOG takes precedence over the configured filter; logs go to stderr
    // so stdout only carries the command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if execute(cli.command, &config)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Run `command`, returning `false` when a checked group is denied
///
/// Parameter precedence: built-in default, then `config.params`, then the
/// positional override.
fn execute(command: Command, config: &Config) -> anyhow::Result<bool> {
    match command {
        Command::Check {
            group,
            params,
            json,
        } => {
            let params = config.params.resolve(params.as_deref())?;
            let group = read_group(&group)?;
            let validator = GroupValidator::new(params);
            let report = validator.report(&group);
            info!(
                "Group of {} transactions for asset {}: {:?}",
                group.len(),
                params.asset_id,
                report.verdict()
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for outcome in &report.outcomes {
                    let status = if outcome.passed { "pass" } else { "FAIL" };
                    println!("#{:<2} [{status}] {}", outcome.number, outcome.description);
                }
                println!("{:?}", report.verdict());
            }

            Ok(report.verdict().is_allow())
        }
        Command::Params { params } => {
            let params = config.params.resolve(params.as_deref())?;
            println!("{}", serde_json::to_string(&params)?);
            Ok(true)
        }
    }
}

fn read_group(source: &str) -> anyhow::Result<TransactionGroup> {
    let content = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read transaction group from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read transaction group {source}"))?
    };

    TransactionGroup::from_json(&content)
        .with_context(|| format!("invalid transaction group in {source}"))
}

mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, preview, send, Context};
use crate::error::{exit_code_for, report_error};
use mailsend_config as config;

pub const BIN_NAME: &str = "mailsend";

#[derive(Debug, Parser)]
#[command(name = BIN_NAME, version, about = "Send email lists from plaintext files")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Base URL of the API; `/send` is appended
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// List the emails found in files without sending them
    Preview(preview::PreviewArgs),
    /// Send the deduplicated emails from files
    Send(send::SendArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        api_url,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let mut app_config =
                config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            if let Some(raw) = api_url {
                app_config.api_url =
                    config::validate_api_url(&raw).with_context(|| "parse --api-url")?;
            }
            debug!(api_url = %app_config.api_url, "api url resolved");

            let ctx = Context {
                json,
                config: &app_config,
            };

            match command {
                Command::Preview(args) => preview::preview(&ctx, args),
                Command::Send(args) => send::send(&ctx, args),
                Command::Completions(_) => {
                    unreachable!("completions command handled before config loading")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

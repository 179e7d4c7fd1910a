mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{check, completions, connections, Context};
use crate::error::{exit_code_for, invalid_input, report_error};
use reachpilot_config as config;
use reachpilot_core::rules::{normalize_email, validate_email};
use reachpilot_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "reachpilot", version, about = "reachpilot CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Act as this recruiter; overrides owner_email from the config file
    #[arg(long, global = true)]
    owner: Option<String>,
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
    /// Validate connection fields without saving anything
    Check(check::CheckArgs),
    Add(connections::AddArgs),
    Edit(connections::EditArgs),
    Show(connections::ShowArgs),
    List(connections::ListArgs),
    Delete(connections::DeleteArgs),
    Stats(connections::StatsArgs),
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
        db_path,
        config: config_path,
        owner,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        Command::Check(args) => check::check(json, args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path.clone()) {
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

            let owner_email = resolve_owner(owner, &app_config)?;
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;

            if verbose {
                debug!(path = %db_path.display(), "database path resolved");
            }

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let ctx = Context {
                store: &store,
                json,
                owner_email,
                config: &app_config,
            };

            match command {
                Command::Add(args) => connections::add_connection(&ctx, args),
                Command::Edit(args) => connections::edit_connection(&ctx, args),
                Command::Show(args) => connections::show_connection(&ctx, args),
                Command::List(args) => connections::list_connections(&ctx, args),
                Command::Delete(args) => connections::delete_connection(&ctx, args),
                Command::Stats(args) => connections::show_stats(&ctx, args),
                Command::Completions(_) => {
                    unreachable!("completions command handled before store initialization")
                }
                Command::Check(_) => {
                    unreachable!("check command handled before store initialization")
                }
            }
        }
    }
}

fn resolve_owner(flag: Option<String>, config: &config::AppConfig) -> Result<String> {
    if let Some(raw) = flag {
        validate_email(&raw)
            .map_err(|err| invalid_input(format!("invalid --owner value: {}", err)))?;
        return Ok(normalize_email(&raw));
    }
    if let Some(owner) = config.owner_email.as_deref() {
        return Ok(owner.to_string());
    }
    Err(invalid_input(
        "owner email required: pass --owner or set owner_email in the config file",
    ))
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
        .try_init();
}

mod cli;
mod commands;
mod error;
mod output;

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use deskbook_config::{Config, Logging};
use deskbook_core::{ApiClient, BookingStore, Router, ViewContext};

use crate::cli::{Cli, Command};
use crate::commands::Session;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let mut cli = Cli::parse();

    // Unreadable config falls back to defaults, reported once tracing is up
    let (cfg, cfg_err) = match deskbook_config::load_config() {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };
    cli.global.apply_defaults(&cfg.defaults);

    let guard = init_tracing(cli.global.verbose, cli.global.quiet, &cfg.logging);
    if let Some(e) = cfg_err {
        tracing::warn!(error = %e, "ignoring config file, using defaults");
    }

    if let Err(err) = run(cli, cfg).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        drop(guard);
        std::process::exit(code);
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `-v`, which wins
/// over `logging.level`. With `logging.file` set, logs go to that file
/// through a non-blocking writer whose guard must outlive the program.
fn init_tracing(verbosity: u8, quiet: bool, logging: &Logging) -> Option<WorkerGuard> {
    let level = match verbosity {
        0 if quiet => "error",
        0 => logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.file {
        let log_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let log_filename = path.file_name().unwrap_or(OsStr::new("deskbook.log"));

        let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .with_ansi(false)
            .init();
        return Some(guard);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    None
}

async fn run(cli: Cli, cfg: Config) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't talk to the backend
        Command::Config(args) => commands::config_cmd::handle(args, &cfg, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "deskbook", &mut std::io::stdout());
            Ok(())
        }

        Command::Routes => commands::routes::handle(&Router::new(), &cli.global),

        cmd => {
            let api = Arc::new(ApiClient::new()?);
            let store = Arc::new(BookingStore::new());
            let session = Session {
                ctx: ViewContext::new(api, store),
                router: Router::new(),
                config: cfg,
            };

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &session, &cli.global).await
        }
    }
}

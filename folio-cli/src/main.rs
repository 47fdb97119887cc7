//! Folio CLI: a sandboxed portfolio shell for the terminal.
//!
//! Runs the full-screen TUI by default, a plain line REPL with `--no-tui`, or a
//! single command with `-c`.

mod repl;
mod tui;

use clap::Parser;
use folio_core::{Dispatcher, HttpService, Sandbox, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Folio: browse a portfolio like a shell
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Sandbox root; navigation never leaves this directory
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable TUI, use simple REPL
    #[arg(long)]
    no_tui: bool,

    /// Run one command line, print its output, and exit
    #[arg(short, long)]
    command: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = folio_core::load_config(Some(&cli.root), cli.config.as_deref(), None)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    let use_tui = cli.command.is_none() && !cli.no_tui && config.ui.use_tui;

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        _ if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // The stderr layer would draw over the alternate screen, so the TUI
    // only logs to file.
    let stderr_layer = (!use_tui).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(EnvFilter::new(filter))
    });

    // JSON file layer for structured logging
    let log_dir = directories::ProjectDirs::from("dev", "folio", "folio")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "folio.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let sandbox = Sandbox::local(&cli.root)
        .map_err(|e| anyhow::anyhow!("Cannot open {}: {}", cli.root.display(), e))?;
    let service = Arc::new(HttpService::new(&config.network)?);
    let (dispatcher, completions) = Dispatcher::channel(service);
    let session = Session::new(sandbox, config);

    if let Some(line) = cli.command {
        let shell = repl::LineShell::new(session, dispatcher, completions);
        repl::run_single_command(shell, &line).await
    } else if use_tui {
        tui::run(session, dispatcher, completions).await
    } else {
        let shell = repl::LineShell::new(session, dispatcher, completions);
        repl::run_interactive(shell).await
    }
}

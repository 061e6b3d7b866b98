use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use inbox_agent::cli::{self, Command, Dashboard};
use inbox_agent::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&config);

    let mut dashboard = Dashboard::open(&config)
        .await
        .with_context(|| format!("opening data directory {}", config.data_dir.display()))?;

    eprintln!("{}", cli::banner(&config, dashboard.engine_name()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprint!("> ");
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let command = Command::parse(&line);
        match command {
            Command::Empty => {
                eprint!("> ");
                continue;
            }
            Command::Quit => break,
            _ => {}
        }
        let output = dashboard.execute(command).await;
        println!("\n{}\n", output);
        eprint!("> ");
    }

    tracing::info!("Session ended");
    Ok(())
}

/// Logs go to stderr, plus a daily-rolling file when a log dir is configured.
fn init_tracing(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "inbox-agent.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    guard
}

mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use todo_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TODO_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "todo", &mut std::io::stdout());
        return Ok(());
    }

    let config = match cli.config {
        Some(ref path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let file_path = config
        .resolve_data_file(cli.file)
        .ok_or_else(|| anyhow::anyhow!("--file is required: no data directory available"))?;

    let mut ctx = CliContext::load(&file_path, &config).await;

    match cli.command {
        Commands::Todo(action) => handlers::todo::handle(&mut ctx, action).await?,
        Commands::Arrange(action) => handlers::arrange::handle(&mut ctx, action).await?,
        Commands::Filter(cmd) => handlers::view::handle_filter(&mut ctx, cmd.action).await?,
        Commands::Theme(cmd) => handlers::view::handle_theme(&mut ctx, cmd.action).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod app;
mod auth;
mod config;
mod db;
mod density;
mod error;
mod export;
mod guests;
mod session;
mod state;

use crate::config::DatabaseConfig;
use crate::db::Database;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "otel-kayit", about = "Hotel guest registration service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Write every guest record to a JSON file.
    Export {
        #[arg(long, default_value = export::services::EXPORT_FILENAME)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "otel_kayit=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app_state = AppState::init().await?;
            let (host, port) = (app_state.config.host.clone(), app_state.config.port);
            app::serve(app::build_app(app_state), &host, port).await
        }
        Command::Export { out } => {
            let db = Database::new(&DatabaseConfig::from_env().url)?;
            db.migrate().await?;
            let count = export::services::export_to_file(&db, &out).await?;
            tracing::info!(records = count, path = %out.display(), "guest records exported");
            Ok(())
        }
    }
}

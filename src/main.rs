use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::db::properties::SqlitePropertyStore;
use crate::db::zip_cache::SqliteDemographicStore;
use crate::demographics::{DemographicService, ZipWhoFetcher};
use crate::router::respond;
use crate::state::AppState;
use astra::{Request, Server};
use clap::Parser;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod db;
mod demographics;
mod domain;
mod errors;
mod ingest;
mod responses;
mod router;
mod routes;
mod state;

#[cfg(test)]
mod tests;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            return ExitCode::FAILURE;
        }
    };

    // 1. Database handle + schema
    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db) {
        tracing::error!(error = %e, "database initialization failed");
        return ExitCode::FAILURE;
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, db),
        Command::Ingest { source } => {
            let source = source.unwrap_or_else(|| config.ingest.source.clone());
            match ingest::ingest(&db, &source, &config.ingest, &config.demographics.user_agent) {
                Ok(rows) => {
                    tracing::info!(rows, "ingestion finished");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!(error = %e, "ingestion failed");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn serve(config: &AppConfig, db: Database) -> ExitCode {
    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(bind_addr = %config.bind_addr, error = %e, "invalid bind address");
            return ExitCode::FAILURE;
        }
    };

    // 2. Demographics: sqlite cache in front of the scraper
    let fetcher = match ZipWhoFetcher::new(&config.demographics) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!(error = %e, "could not build demographics client");
            return ExitCode::FAILURE;
        }
    };
    let demographics = DemographicService::new(
        Arc::new(SqliteDemographicStore::new(db.clone())),
        Arc::new(fetcher),
    );
    let state = AppState::new(Arc::new(SqlitePropertyStore::new(db)), demographics);

    // 3. Serve
    tracing::info!(%addr, workers = config.max_workers, "starting server");
    let server = Server::bind(&addr).max_workers(config.max_workers);

    let result = server.serve(move |req: Request, _info| respond(req, &state));

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
        return ExitCode::FAILURE;
    }

    tracing::info!("server shut down cleanly");
    ExitCode::SUCCESS
}

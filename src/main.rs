use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod clock;
mod config;
mod db;
mod error;
mod markup;
mod models;
mod pages;
mod render;
mod session;
mod subjects;

use config::Args;
use db::Database;

#[derive(Clone)]
struct AppState {
    db_path: PathBuf,
}

fn app(state: AppState) -> Router {
    Router::new()
        .merge(pages::routes())
        .nest("/api", api::routes())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // a missing .env is fine; flags and real env vars still apply
    dotenv::dotenv().ok();
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fail at startup rather than on the first request if the file is unusable.
    Database::connect(&args.db)?;
    let state = AppState {
        db_path: args.db.clone(),
    };

    let addr = args.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(db = %args.db.display(), "weekplan running on http://{addr}");

    axum::serve(listener, app(state)).await?;

    Ok(())
}

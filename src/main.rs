//! Sponsorbook - merchant sponsorship coordination service.
//!
//! Proxies and caches a Google-Sheets-backed merchant list for the
//! sponsorship UI, and performs merchant -> volunteer assignment writes
//! through an Apps Script endpoint with a best-effort per-volunteer cap.

mod api;
mod assign;
mod cache;
mod config;
mod http;
mod icons;
mod models;
mod query;
mod reader;

use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::SheetsClient;
use assign::AssignmentCoordinator;
use config::Config;
use http::AppState;
use reader::SheetReader;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Re-warm the merchant cache on a fixed interval so reads stay fast and a
/// stale cache never outlives the TTL by much. Failures wait for the next
/// tick; there is no tighter retry loop.
fn spawn_periodic_refresh(reader: SheetReader, config: Arc<Config>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(config.refresh_interval());
        // First tick fires immediately; skip it, startup already serves fresh
        interval.tick().await;

        loop {
            interval.tick().await;
            match reader.fetch_merchants(false).await {
                Ok(merchants) => {
                    info!(count = merchants.len(), "Background refresh complete");
                }
                Err(e) => {
                    warn!(error = %e, "Background refresh failed");
                }
            }
        }
    });
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = Arc::new(Config::load().context("Failed to load configuration")?);
    info!(
        bind = %config.bind_addr,
        merchants_range = %config.merchants_range,
        cap = config.assignment_cap,
        cap_enforced = config.enforce_assignment_cap,
        "Sponsorbook starting"
    );

    let client = SheetsClient::new(&config).context("Failed to build sheets client")?;
    let reader = SheetReader::new(client.clone(), Arc::clone(&config));
    let coordinator =
        AssignmentCoordinator::new(client, reader.clone(), Arc::clone(&config));

    spawn_periodic_refresh(reader.clone(), Arc::clone(&config));

    let state = web::Data::new(AppState {
        reader,
        coordinator,
    });

    let bind_addr = config.bind_addr.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(http::configure_routes())
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await?;

    info!("Sponsorbook shutting down");
    Ok(())
}

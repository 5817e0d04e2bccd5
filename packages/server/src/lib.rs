#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the surveillance dashboard.
//!
//! Serves the REST API the dashboard frontend renders from: filtered
//! aggregate products computed fresh per request from a cached snapshot
//! of the agency's report sheet, canned analytical reports, and the
//! LLM-backed assistant with in-memory session history.

mod handlers;

use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use screwworm_map_conversations::SessionStore;
use screwworm_map_source::{CachedSource, DEFAULT_CACHE_TTL, SheetSource};

/// Shared application state.
pub struct AppState {
    /// Cached observation source.
    pub source: CachedSource,
    /// Assistant session histories.
    pub sessions: SessionStore,
    /// Regional municipality total for coverage percentages.
    pub total_municipalities: u64,
}

/// Starts the surveillance dashboard API server.
///
/// Reads configuration from the environment (`SHEET_CSV_URL`,
/// `CACHE_TTL_SECS`, `TOTAL_MUNICIPALITIES`, `BIND_ADDR`, `PORT`), builds
/// the shared state, and runs the Actix-Web HTTP server. This is a
/// regular async function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if `SHEET_CSV_URL` is not set; without the sheet export URL
/// there is no data to serve.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let sheet_url =
        std::env::var("SHEET_CSV_URL").expect("SHEET_CSV_URL environment variable not set");

    let ttl = std::env::var("CACHE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map_or(DEFAULT_CACHE_TTL, Duration::from_secs);

    let total_municipalities = std::env::var("TOTAL_MUNICIPALITIES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(screwworm_map_geography::TOTAL_MUNICIPALITIES);

    log::info!("Observation source: {sheet_url} (cache TTL {}s)", ttl.as_secs());

    let state = web::Data::new(AppState {
        source: CachedSource::new(Box::new(SheetSource::new(sheet_url)), ttl),
        sessions: SessionStore::new(),
        total_municipalities,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/municipalities", web::get().to(handlers::municipalities))
                    .route("/metrics", web::get().to(handlers::metrics))
                    .route("/map", web::get().to(handlers::map_data))
                    .route("/rankings", web::get().to(handlers::rankings))
                    .route("/weekly", web::get().to(handlers::weekly))
                    .route("/timeline", web::get().to(handlers::timeline))
                    .route("/coverage", web::get().to(handlers::coverage))
                    .route("/dashboard", web::get().to(handlers::dashboard))
                    .route(
                        "/recommendations",
                        web::get().to(handlers::recommendations),
                    )
                    .route("/assistant/ask", web::post().to(handlers::assistant_ask))
                    .route(
                        "/assistant/clear",
                        web::post().to(handlers::assistant_clear),
                    )
                    .route(
                        "/assistant/transcript",
                        web::get().to(handlers::assistant_transcript),
                    ),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

//! Writing Mentor · Tiered English Writing Tutor Backend
//!
//! - Axum HTTP + WebSocket API over per-level task catalogs and learner sessions
//! - Mentor replies via an OpenAI-compatible chat endpoint (optional; canned fallbacks otherwise)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   OPENAI_API_KEY     : enables the mentor endpoint if present
//!   OPENAI_BASE_URL    : default "https://api.openai.com/v1"
//!   OPENAI_MODEL       : default "gpt-4o-mini"
//!   MENTOR_CONFIG_PATH : path to TOML config (persona prompts, transcript cap, request timeout,
//!                        session idle expiry, optional RNG seed)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod error;
mod config;
mod seeds;
mod catalog;
mod session;
mod analysis;
mod dialogue;
mod openai;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::{spawn_session_sweeper, AppState};

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared state: catalog, dialogue service, session table.
  let state = Arc::new(AppState::new());
  spawn_session_sweeper(state.clone());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "writing_mentor", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if tokio::signal::ctrl_c().await.is_ok() {
    info!(target: "writing_mentor", "Shutdown signal received");
  }
}

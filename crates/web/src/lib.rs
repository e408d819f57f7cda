//! Web Library
//!
//! HTTP front end for the user repository: an action dispatcher rendering
//! HTML pages, a small JSON API and a health check.

pub mod config;
pub mod controllers;
pub mod dispatcher;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use user_repository_lib::{Database, UserRepository, UserStore};

use crate::config::WebConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the full application over an open database.
pub fn build_app(database: Database) -> Router {
    let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(database.get_connection()));
    let state = AppState::new(users, database);

    create_router(state).layer(TraceLayer::new_for_http())
}

/// Connect to the database, apply migrations and serve HTTP until shutdown.
pub async fn run_server(config: WebConfig) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::connect(&config.database).await?;
    let app = build_app(database);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Web server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

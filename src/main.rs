use axum::{
    http::{HeaderValue, Method},
    response::Json,
    routing::get,
    Router,
};
use dotenvy::dotenv;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod audit;
mod controllers;
mod db;
mod ledger;
mod middleware;
mod models;
mod routes;
mod state;
mod utils;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database = match db::connection::init_db().await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("failed to initialize database: {e}");
            std::process::exit(1);
        }
    };

    let app_state = state::AppState::new(database, Arc::new(audit::TracingAudit));

    let cors_origin = std::env::var("CORS_ORIGIN").unwrap_or_else(|_| {
        error!("CORS_ORIGIN environment variable not set");
        std::process::exit(1);
    });

    let origin = cors_origin.parse::<HeaderValue>().unwrap_or_else(|_| {
        error!("failed to parse CORS origin: {cors_origin}");
        std::process::exit(1);
    });

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::header::COOKIE,
        ])
        .allow_credentials(true);

    let app = Router::new()
        .route("/", get(root))
        .nest("/polls", routes::poll_routes::poll_routes(app_state.clone()))
        .nest("/auth", routes::auth_routes::auth_routes(app_state.clone()))
        .layer(cors);

    let server_addr =
        std::env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let addr: SocketAddr = server_addr.parse().unwrap_or_else(|_| {
        error!("failed to parse SERVER_ADDR: {server_addr}");
        std::process::exit(1);
    });

    info!("listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "service": "polls-backend", "status": "ok" }))
}

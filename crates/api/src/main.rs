use std::env;

use anyhow::Result;
use sewa_api::build_app;
use sewa_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("sewa_api");

    let bind = env::var("SEWA_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = build_app();

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, "sewa sahayak api started");

    axum::serve(listener, app).await?;
    Ok(())
}

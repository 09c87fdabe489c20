use std::{error::Error, sync::Arc};

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use tokio::net;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{
    layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use users_service::{db, http, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load("config.toml").await?;

    let db_client = db::connect(&config.seed).await?;
    tracing::info!(users = db_client.get_users()?.len(), "seed loaded");

    let origins = config
        .http
        .cors
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(AllowOrigin::list(origins));

    let app = http::router(Arc::new(http::AppState { db_client })).layer(cors);

    let addr = config.http.server.addr();
    let listener = net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on port http://localhost:{}", addr.port());
    axum::serve(listener, app).await?;

    Ok(())
}

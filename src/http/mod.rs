//! HTTP surface: routes, handlers and the mapping of every outcome onto a
//! status code and an [`api`] envelope.

mod extract;
mod user;

use std::{any::Any, fmt, sync::Arc};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{api, db};

pub use self::extract::{BodyError, JsonBody};

pub const GREETING: &str = "Hola mundo desde Rust";
pub const INVALID_ID: &str = "El id debe ser un número";
pub const NOT_FOUND: &str = "Recurso no encontrado";
pub const INTERNAL_ERROR: &str = "Error interno del servidor";

pub type SharedAppState = Arc<AppState>;

pub struct AppState {
    pub db_client: db::Client,
}

pub fn router(state: SharedAppState) -> Router {
    Router::new()
        .route("/", get(hello).fallback(not_found))
        .route(
            "/users",
            get(user::list_users)
                .post(user::add_user)
                .fallback(not_found),
        )
        .route("/users/:userId", get(user::get_user).fallback(not_found))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn hello() -> &'static str {
    GREETING
}

async fn not_found() -> Response {
    failure(StatusCode::NOT_FOUND, NOT_FOUND)
}

fn failure(status: StatusCode, message: impl Into<api::Message>) -> Response {
    (status, Json(api::Failure::new(message))).into_response()
}

fn internal_error(err: &dyn fmt::Display) -> Response {
    tracing::error!("request failed: {err}");
    failure(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    internal_error(&format_args!("handler panicked: {details}"))
}

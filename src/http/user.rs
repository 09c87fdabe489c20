use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;

use crate::{api, db, validation};

use super::{failure, internal_error, JsonBody, SharedAppState, INVALID_ID};

pub(super) async fn list_users(
    State(state): State<SharedAppState>,
) -> Result<Json<api::Success<Vec<api::User>>>, ListUsersError> {
    let users = state.db_client.get_users()?;
    Ok(Json(api::Success::new(users)))
}

#[derive(Debug, From)]
pub enum ListUsersError {
    #[from]
    DbError(db::Error),
}

impl IntoResponse for ListUsersError {
    fn into_response(self) -> Response {
        match self {
            Self::DbError(e) => internal_error(&e),
        }
    }
}

/// Missing users answer `204`, so the `data: null` envelope never reaches
/// the wire. Integers too large for any stored id are misses as well.
pub(super) async fn get_user(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<api::Success<Option<api::User>>>), GetUserError>
{
    use GetUserError as E;

    let user = match api::user::Id::parse(&id) {
        Some(id) => state.db_client.get_user_by_id(id)?,
        None if api::user::Id::is_integer(&id) => None,
        None => return Err(E::InvalidId),
    };

    let status = if user.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NO_CONTENT
    };
    Ok((status, Json(api::Success::new(user))))
}

#[derive(Debug, From)]
pub enum GetUserError {
    #[from]
    DbError(db::Error),
    InvalidId,
}

impl IntoResponse for GetUserError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidId => failure(StatusCode::BAD_REQUEST, INVALID_ID),
            Self::DbError(e) => internal_error(&e),
        }
    }
}

pub(super) async fn add_user(
    State(state): State<SharedAppState>,
    JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<api::Success<api::User>>), AddUserError> {
    use AddUserError as E;

    let user = validation::validate_user(&payload)
        .map_err(E::InvalidUser)?
        .with_id(api::user::Id::new());

    state.db_client.write_user(&user)?;
    tracing::info!(id = %user.id, username = %user.username, "user created");

    Ok((StatusCode::CREATED, Json(api::Success::new(user))))
}

#[derive(Debug, From)]
pub enum AddUserError {
    #[from]
    DbError(db::Error),
    InvalidUser(Vec<api::Violation>),
}

impl IntoResponse for AddUserError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidUser(violations) => {
                failure(StatusCode::BAD_REQUEST, violations)
            }
            Self::DbError(e) => internal_error(&e),
        }
    }
}

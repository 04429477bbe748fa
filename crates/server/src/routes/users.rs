use axum::{extract::{Path, State}, http::StatusCode, Json};
use common::observability::{USERS_CREATED_TOTAL, USERS_DELETED_TOTAL, USERS_UPDATED_TOTAL};
use service::domain::{NewUser, User, UserPatch};
use tracing::info;

use crate::{errors::JsonApiError, extract::ApiJson, state::ServerState};

const STORE: &str = "users";

#[utoipa::path(
    get, path = "/api/users", tag = "users",
    responses(
        (status = 200, description = "All users in insertion order"),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<Vec<User>>, JsonApiError> {
    let users = state.users.list().await.map_err(|e| JsonApiError::from_service(STORE, e))?;
    info!(count = users.len(), "list users");
    Ok(Json(users))
}

#[utoipa::path(
    post, path = "/api/users", tag = "users",
    request_body = crate::openapi::NewUserDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 422, description = "Body is not a user form"),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn create_user(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<User>), JsonApiError> {
    let user = state.users.create(input).await.map_err(|e| JsonApiError::from_service(STORE, e))?;
    USERS_CREATED_TOTAL.inc();
    info!(id = %user.id, "created user");
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get, path = "/api/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<User>, JsonApiError> {
    let user = state.users.get(&id).await.map_err(|e| JsonApiError::from_service(STORE, e))?;
    Ok(Json(user))
}

/// Shallow merge: keys present in the body replace stored values, the rest stay.
/// Mounted for both PUT and PATCH.
#[utoipa::path(
    patch, path = "/api/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = crate::openapi::UserPatchDoc,
    responses(
        (status = 200, description = "Merged record"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn update_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> Result<Json<User>, JsonApiError> {
    let user = state.users.update(&id, patch).await.map_err(|e| JsonApiError::from_service(STORE, e))?;
    USERS_UPDATED_TOTAL.inc();
    info!(id = %user.id, "updated user");
    Ok(Json(user))
}

#[utoipa::path(
    delete, path = "/api/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted record"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<User>, JsonApiError> {
    let user = state.users.delete(&id).await.map_err(|e| JsonApiError::from_service(STORE, e))?;
    USERS_DELETED_TOTAL.inc();
    info!(id = %user.id, "deleted user");
    Ok(Json(user))
}

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use media::purge_route_media;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{camping_route, comment, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::route::delete_route_rows;
use crate::models::comment::CommentResponse;
use crate::models::route::RouteResponse;
use crate::models::user::UserResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user's public profile",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(find_user(&state.db, id).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    operation_id = "deleteUser",
    summary = "Delete an account",
    description = "Only the account holder may delete it. All of the user's routes (and their media), comments and views go with it.",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the account holder (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = find_user(&state.db, id).await?;
    auth_user.require_owner(user.id)?;

    let route_ids: Vec<i32> = camping_route::Entity::find()
        .filter(camping_route::Column::UserId.eq(id))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|r| r.id)
        .collect();

    for &route_id in &route_ids {
        purge_route_media(&state.tracks, &state.images, &user.username, route_id).await?;
    }

    let txn = state.db.begin().await?;
    for &route_id in &route_ids {
        delete_route_rows(&txn, route_id).await?;
    }
    comment::Entity::delete_many()
        .filter(comment::Column::UserId.eq(id))
        .exec(&txn)
        .await?;
    user::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = id, routes = route_ids.len(), "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/users/{id}/routes",
    tag = "Users",
    operation_id = "listUserRoutes",
    summary = "List the routes a user owns",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Routes, newest first", body = Vec<RouteResponse>),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn list_user_routes(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    find_user(&state.db, id).await?;

    let routes = camping_route::Entity::find()
        .filter(camping_route::Column::UserId.eq(id))
        .order_by_desc(camping_route::Column::CreatedAt)
        .order_by_desc(camping_route::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(routes.into_iter().map(RouteResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{id}/comments",
    tag = "Users",
    operation_id = "listUserComments",
    summary = "List the comments a user wrote",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Comments, newest first", body = Vec<CommentResponse>),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn list_user_comments(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    find_user(&state.db, id).await?;

    let comments = comment::Entity::find()
        .filter(comment::Column::UserId.eq(id))
        .order_by_desc(comment::Column::CreatedAt)
        .order_by_desc(comment::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

async fn find_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))
}

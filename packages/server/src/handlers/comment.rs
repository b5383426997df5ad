use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::comment;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::route::find_route;
use crate::models::comment::{CommentResponse, CreateCommentRequest, validate_create_comment};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/routes/{id}/comments",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Comment on a route",
    params(("id" = i32, Path, description = "Route ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Route not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(route_id, user_id = auth_user.user_id))]
pub async fn create_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_comment(&payload)?;
    find_route(&state.db, route_id).await?;

    let model = comment::ActiveModel {
        content: Set(payload.content.trim().to_string()),
        user_id: Set(auth_user.user_id),
        route_id: Set(route_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/routes/{id}/comments",
    tag = "Comments",
    operation_id = "listRouteComments",
    summary = "List comments on a route",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Comments, oldest first", body = Vec<CommentResponse>),
        (status = 404, description = "Route not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(route_id))]
pub async fn list_route_comments(
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    find_route(&state.db, route_id).await?;

    let comments = comment::Entity::find()
        .filter(comment::Column::RouteId.eq(route_id))
        .order_by_asc(comment::Column::CreatedAt)
        .order_by_asc(comment::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/routes/{id}/comments",
    tag = "Comments",
    operation_id = "deleteRouteComments",
    summary = "Delete every comment on a route",
    description = "Route owner only.",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 204, description = "Comments deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the route owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Route not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(route_id))]
pub async fn delete_route_comments(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let route = find_route(&state.db, route_id).await?;
    auth_user.require_owner(route.user_id)?;

    let res = comment::Entity::delete_many()
        .filter(comment::Column::RouteId.eq(route_id))
        .exec(&state.db)
        .await?;

    tracing::info!(route_id, deleted = res.rows_affected, "Deleted route comments");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "Comments",
    operation_id = "deleteComment",
    summary = "Delete a comment",
    description = "Comment author only.",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let comment = comment::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment with id {id} not found")))?;
    auth_user.require_owner(comment.user_id)?;

    comment::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

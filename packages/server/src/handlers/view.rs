use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::view;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::route::find_route;
use crate::models::view::ViewCountResponse;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/routes/{id}/views",
    tag = "Views",
    operation_id = "recordView",
    summary = "Record a view of a route",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Updated view count", body = ViewCountResponse),
        (status = 404, description = "Route not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(route_id))]
pub async fn record_view(
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> Result<Json<ViewCountResponse>, AppError> {
    find_route(&state.db, route_id).await?;

    view::ActiveModel {
        route_id: Set(route_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(Json(count_views(&state.db, route_id).await?))
}

#[utoipa::path(
    get,
    path = "/routes/{id}/views",
    tag = "Views",
    operation_id = "getViews",
    summary = "View count of a route",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 200, description = "View count", body = ViewCountResponse),
        (status = 404, description = "Route not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(route_id))]
pub async fn get_views(
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> Result<Json<ViewCountResponse>, AppError> {
    find_route(&state.db, route_id).await?;
    Ok(Json(count_views(&state.db, route_id).await?))
}

#[utoipa::path(
    delete,
    path = "/routes/{id}/views",
    tag = "Views",
    operation_id = "resetViews",
    summary = "Reset the view count of a route",
    description = "Route owner only.",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 204, description = "Views reset"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the route owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Route not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(route_id))]
pub async fn reset_views(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let route = find_route(&state.db, route_id).await?;
    auth_user.require_owner(route.user_id)?;

    view::Entity::delete_many()
        .filter(view::Column::RouteId.eq(route_id))
        .exec(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn count_views<C: ConnectionTrait>(
    db: &C,
    route_id: i32,
) -> Result<ViewCountResponse, AppError> {
    let views_count = view::Entity::find()
        .filter(view::Column::RouteId.eq(route_id))
        .count(db)
        .await?;
    Ok(ViewCountResponse {
        route_id,
        views_count,
    })
}

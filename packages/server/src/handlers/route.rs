use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use media::purge_route_media;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{camping_route, comment, view};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::route::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/routes",
    tag = "Routes",
    operation_id = "createRoute",
    summary = "Create a camping route",
    description = "Creates a route owned by the caller.",
    request_body = CreateRouteRequest,
    responses(
        (status = 201, description = "Route created", body = RouteResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(
    skip(state, auth_user, payload),
    fields(user_id = auth_user.user_id, name = %payload.name)
)]
pub async fn create_route(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRouteRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_route(&payload)?;

    let new_route = camping_route::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description.trim().to_string()),
        location: Set(payload.location.trim().to_string()),
        thumbnail_url: Set(payload.thumbnail_url.filter(|u| !u.trim().is_empty())),
        user_id: Set(auth_user.user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_route.insert(&state.db).await?;
    tracing::info!(route_id = model.id, "Created camping route");

    Ok((StatusCode::CREATED, Json(RouteResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/routes",
    tag = "Routes",
    operation_id = "listRoutes",
    summary = "List camping routes with pagination and search",
    description = "Newest first. `keyword` is matched case-insensitively against name, description and location.",
    params(RouteListQuery),
    responses(
        (status = 200, description = "Page of routes", body = RouteListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<RouteListQuery>,
) -> Result<Json<RouteListResponse>, AppError> {
    let (page, per_page) = resolve_paging(&query)?;
    let keyword = validate_keyword(query.keyword.as_deref())?;

    let mut select = camping_route::Entity::find();

    if let Some(keyword) = keyword {
        let pattern = format!("%{}%", escape_like(&keyword).to_lowercase());
        let like = |col: camping_route::Column| {
            Expr::expr(Func::lower(Expr::col(col)))
                .like(LikeExpr::new(pattern.clone()).escape('\\'))
        };
        select = select.filter(
            Condition::any()
                .add(like(camping_route::Column::Name))
                .add(like(camping_route::Column::Description))
                .add(like(camping_route::Column::Location)),
        );
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let data = select
        .order_by_desc(camping_route::Column::CreatedAt)
        .order_by_desc(camping_route::Column::Id)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(RouteResponse::from)
        .collect();

    Ok(Json(RouteListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/routes/{id}",
    tag = "Routes",
    operation_id = "getRoute",
    summary = "Get a camping route by ID",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route details", body = RouteResponse),
        (status = 404, description = "Route not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RouteResponse>, AppError> {
    let model = find_route(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/routes/{id}",
    tag = "Routes",
    operation_id = "deleteRoute",
    summary = "Delete a camping route",
    description = "Owner only. Removes the route's track and images, then its comments, views and the route itself.",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 204, description = "Route deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Route not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, user_id = auth_user.user_id))]
pub async fn delete_route(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let route = find_route(&state.db, id).await?;
    auth_user.require_owner(route.user_id)?;

    // Media first: the stores authorize against the route row.
    purge_route_media(&state.tracks, &state.images, &auth_user.username, id).await?;

    let txn = state.db.begin().await?;
    delete_route_rows(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(route_id = id, "Deleted camping route");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a route together with its comments and views.
pub(crate) async fn delete_route_rows<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), AppError> {
    comment::Entity::delete_many()
        .filter(comment::Column::RouteId.eq(id))
        .exec(db)
        .await?;
    view::Entity::delete_many()
        .filter(view::Column::RouteId.eq(id))
        .exec(db)
        .await?;
    camping_route::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

pub(crate) async fn find_route<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<camping_route::Model, AppError> {
    camping_route::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Camping route with id {id} not found")))
}

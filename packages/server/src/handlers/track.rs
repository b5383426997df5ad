use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::state::AppState;
use crate::utils::download::file_response;

const GPX_CONTENT_TYPE: &str = "application/gpx+xml";

/// Body limit applied to media upload endpoints.
pub fn media_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    DefaultBodyLimit::max(usize::try_from(max_upload_size).unwrap_or(usize::MAX))
}

#[utoipa::path(
    put,
    path = "/routes/{id}/track",
    tag = "Tracks",
    operation_id = "uploadTrack",
    summary = "Upload or replace a route's GPX track",
    description = "Route owner only. The `file` multipart field must be a non-empty `.gpx` file. \
        Replaces any existing track.",
    params(("id" = i32, Path, description = "Route ID")),
    request_body(content_type = "multipart/form-data", description = "GPX file in field `file`"),
    responses(
        (status = 204, description = "Track stored"),
        (status = 400, description = "Empty or non-GPX file (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the route owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Route not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(route_id, user = %auth_user.username))]
pub async fn upload_track(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file_name = String::new();
    let mut data = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().unwrap_or_default().to_string();
            data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
                .to_vec();
        }
    }

    // A missing field is stored as an empty upload, which the store rejects after authorizing.
    state
        .tracks
        .store(&auth_user.username, route_id, &data, &file_name)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/routes/{id}/track",
    tag = "Tracks",
    operation_id = "downloadTrack",
    summary = "Download a route's GPX track",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 200, description = "GPX content", content_type = "application/gpx+xml"),
        (status = 404, description = "No track stored (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(route_id))]
pub async fn download_track(
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> Result<Response, AppError> {
    let bytes = state.tracks.fetch(route_id).await?;
    file_response(
        bytes,
        &format!("route-{route_id}.gpx"),
        Some(GPX_CONTENT_TYPE),
    )
}

#[utoipa::path(
    delete,
    path = "/routes/{id}/track",
    tag = "Tracks",
    operation_id = "deleteTrack",
    summary = "Delete a route's GPX track",
    description = "Route owner only.",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 204, description = "Track deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the route owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Route or track not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(route_id, user = %auth_user.username))]
pub async fn delete_track(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.tracks.delete(&auth_user.username, route_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

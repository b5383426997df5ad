use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use media::UploadFile;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::media::{ImageListResponse, ImageUploadResponse};
use crate::state::AppState;
use crate::utils::download::file_response;

#[utoipa::path(
    post,
    path = "/routes/{id}/images",
    tag = "Images",
    operation_id = "uploadImages",
    summary = "Upload images for a route",
    description = "Route owner only. Each `files` multipart field is stored under a generated name \
        that keeps the original extension. Files are stored in order; if one is empty the request \
        fails and the files before it stay stored.",
    params(("id" = i32, Path, description = "Route ID")),
    request_body(content_type = "multipart/form-data", description = "One or more `files` fields"),
    responses(
        (status = 201, description = "Images stored", body = ImageUploadResponse),
        (status = 400, description = "No files or an empty file (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the route owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Route not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(route_id, user = %auth_user.username))]
pub async fn upload_images(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("files") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
            .to_vec();
        files.push(UploadFile { file_name, bytes });
    }

    // Empty batches still go through authorization first.
    let names = state
        .images
        .store_many(&auth_user.username, route_id, &files)
        .await?;

    if names.is_empty() {
        return Err(AppError::Validation("Missing 'files' field".into()));
    }

    Ok((StatusCode::CREATED, Json(ImageUploadResponse { names })))
}

#[utoipa::path(
    get,
    path = "/routes/{id}/images",
    tag = "Images",
    operation_id = "listImages",
    summary = "List a route's image names",
    description = "Order follows the filesystem and is not stable.",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Image names", body = ImageListResponse),
        (status = 404, description = "No images stored for the route (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(route_id))]
pub async fn list_images(
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> Result<Json<ImageListResponse>, AppError> {
    let image_names = state.images.list_names(route_id).await?;
    Ok(Json(ImageListResponse { image_names }))
}

#[utoipa::path(
    get,
    path = "/routes/{id}/images/{name}",
    tag = "Images",
    operation_id = "downloadImage",
    summary = "Download one image",
    params(
        ("id" = i32, Path, description = "Route ID"),
        ("name" = String, Path, description = "Image name as returned on upload"),
    ),
    responses(
        (status = 200, description = "Image content"),
        (status = 400, description = "Invalid image name (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Image not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(route_id, name))]
pub async fn download_image(
    State(state): State<AppState>,
    Path((route_id, name)): Path<(i32, String)>,
) -> Result<Response, AppError> {
    let bytes = state.images.fetch(route_id, &name).await?;
    file_response(bytes, &name, None)
}

#[utoipa::path(
    delete,
    path = "/routes/{id}/images/{name}",
    tag = "Images",
    operation_id = "deleteImage",
    summary = "Delete one image",
    description = "Route owner only.",
    params(
        ("id" = i32, Path, description = "Route ID"),
        ("name" = String, Path, description = "Image name"),
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 400, description = "Invalid image name (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the route owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Route or image not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(route_id, name, user = %auth_user.username))]
pub async fn delete_image(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((route_id, name)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .images
        .delete_one(&auth_user.username, route_id, &name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/routes/{id}/images",
    tag = "Images",
    operation_id = "deleteImages",
    summary = "Delete all of a route's images",
    description = "Route owner only.",
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 204, description = "Images deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the route owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Route or images not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(route_id, user = %auth_user.username))]
pub async fn delete_images(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state
        .images
        .delete_all(&auth_user.username, route_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

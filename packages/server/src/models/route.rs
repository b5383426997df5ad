use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::camping_route;
use crate::error::AppError;

pub use super::shared::{Pagination, escape_like};
use super::shared::validate_length;

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 20;
/// Largest page whose offset still fits the database's signed 64-bit OFFSET.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PER_PAGE;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRouteRequest {
    #[schema(example = "Lakeside loop")]
    pub name: String,
    #[schema(example = "Easy loop around the lake with two camp spots.")]
    pub description: String,
    #[schema(example = "Lake Bled")]
    pub location: String,
    pub thumbnail_url: Option<String>,
}

pub fn validate_create_route(payload: &CreateRouteRequest) -> Result<(), AppError> {
    validate_length(&payload.name, "Name", 3, 100)?;
    validate_length(&payload.description, "Description", 10, 2000)?;
    validate_length(&payload.location, "Location", 3, 100)?;
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RouteResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub location: String,
    pub thumbnail_url: Option<String>,
    /// Owner of the route.
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<camping_route::Model> for RouteResponse {
    fn from(model: camping_route::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            location: model.location,
            thumbnail_url: model.thumbnail_url,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RouteListResponse {
    pub data: Vec<RouteResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteListQuery {
    /// 1-based page number.
    pub page: Option<u64>,
    /// Page size, 1-20.
    pub per_page: Option<u64>,
    /// Case-insensitive substring matched against name, description and location.
    pub keyword: Option<String>,
}

/// Resolve `(page, per_page)` from the query, rejecting out-of-range values.
pub fn resolve_paging(query: &RouteListQuery) -> Result<(u64, u64), AppError> {
    let page = query.page.unwrap_or(1);
    if !(1..=MAX_PAGE).contains(&page) {
        return Err(AppError::Validation(format!("Page must be 1-{MAX_PAGE}")));
    }
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(AppError::Validation(format!(
            "per_page must be 1-{MAX_PER_PAGE}"
        )));
    }
    Ok((page, per_page))
}

/// Returns the trimmed keyword, or `None` if it is absent or blank.
pub fn validate_keyword(keyword: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) else {
        return Ok(None);
    };
    if keyword.chars().count() > 100 {
        return Err(AppError::Validation(
            "Keyword must be at most 100 characters".into(),
        ));
    }
    if !keyword
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || ".,()-".contains(c))
    {
        return Err(AppError::Validation(
            "Keyword may contain only letters, digits, whitespace and .,()-".into(),
        ));
    }
    Ok(Some(keyword.to_string()))
}

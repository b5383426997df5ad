use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::comment;
use crate::error::AppError;

use super::shared::validate_length;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    #[schema(example = "Great views from the second camp.")]
    pub content: String,
}

pub fn validate_create_comment(payload: &CreateCommentRequest) -> Result<(), AppError> {
    validate_length(&payload.content, "Content", 1, 1000)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub content: String,
    /// Author.
    pub user_id: i32,
    pub route_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<comment::Model> for CommentResponse {
    fn from(model: comment::Model) -> Self {
        Self {
            id: model.id,
            content: model.content,
            user_id: model.user_id,
            route_id: model.route_id,
            created_at: model.created_at,
        }
    }
}

use serde::Serialize;

use crate::entity::user;

/// Public profile of a user.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice_hikes")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
        }
    }
}

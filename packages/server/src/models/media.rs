use serde::Serialize;

/// Names generated for a batch of uploaded images, in upload order.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ImageUploadResponse {
    #[schema(example = json!(["3f2a9c0e5b8d4e7f9a1b2c3d4e5f6a7b.png"]))]
    pub names: Vec<String>,
}

/// Images currently stored for a route.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ImageListResponse {
    pub image_names: Vec<String>,
}

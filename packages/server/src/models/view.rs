use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ViewCountResponse {
    #[schema(example = 1)]
    pub route_id: i32,
    #[schema(example = 17)]
    pub views_count: u64,
}

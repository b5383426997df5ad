use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One recorded page view of a camping route.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "view")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub route_id: i32,
    #[sea_orm(belongs_to, from = "route_id", to = "id")]
    pub camping_route: HasOne<super::camping_route::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

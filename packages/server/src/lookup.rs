use async_trait::async_trait;
use media::{LookupError, RouteLookup, RouteRef};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::entity::{camping_route, user};

/// Resolves route ownership from the `camping_route` and `user` tables.
pub struct DbRouteLookup {
    db: DatabaseConnection,
}

impl DbRouteLookup {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RouteLookup for DbRouteLookup {
    async fn find_route(&self, route_id: i32) -> Result<Option<RouteRef>, LookupError> {
        let Some(route) = camping_route::Entity::find_by_id(route_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let owner = user::Entity::find_by_id(route.user_id).one(&self.db).await?;

        Ok(owner.map(|owner| RouteRef {
            id: route.id,
            owner_username: owner.username,
        }))
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Error type returned by a [`RouteLookup`] backend.
pub type LookupError = Box<dyn std::error::Error + Send + Sync>;

/// Read-only projection of a camping route, as far as media ownership is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRef {
    pub id: i32,
    pub owner_username: String,
}

/// Resolves a route id to its owner.
#[async_trait]
pub trait RouteLookup: Send + Sync {
    /// Returns `Ok(None)` when no route with `route_id` exists.
    async fn find_route(&self, route_id: i32) -> Result<Option<RouteRef>, LookupError>;
}

/// Binds a caller's identity to a route's recorded owner.
///
/// Every call re-resolves the owner, so ownership changes apply immediately.
#[derive(Clone)]
pub struct OwnershipGate {
    lookup: Arc<dyn RouteLookup>,
}

impl OwnershipGate {
    pub fn new(lookup: Arc<dyn RouteLookup>) -> Self {
        Self { lookup }
    }

    /// Succeed only if `route_id` exists and is owned by `caller` (exact, case-sensitive match).
    pub async fn authorize(&self, caller: &str, route_id: i32) -> MediaResult<RouteRef> {
        let route = self
            .lookup
            .find_route(route_id)
            .await
            .map_err(|e| MediaError::Storage(std::io::Error::other(e)))?
            .ok_or_else(|| {
                debug!(route_id, "Route lookup miss");
                MediaError::RouteNotFound(route_id)
            })?;

        if route.owner_username != caller {
            warn!(route_id, caller, "Media mutation refused: caller does not own route");
            return Err(MediaError::NotPermitted);
        }

        Ok(route)
    }
}

impl std::fmt::Debug for OwnershipGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnershipGate").finish_non_exhaustive()
    }
}

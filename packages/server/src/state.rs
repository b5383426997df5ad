use std::sync::Arc;

use media::{ImageStore, MediaError, MediaLayout, OwnershipGate, TrackStore};
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::lookup::DbRouteLookup;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub tracks: Arc<TrackStore>,
    pub images: Arc<ImageStore>,
}

impl AppState {
    /// Wire the media stores to the database-backed route lookup.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Result<Self, MediaError> {
        let layout = MediaLayout::new(&config.media.root)?;
        let gate = OwnershipGate::new(Arc::new(DbRouteLookup::new(db.clone())));

        Ok(Self {
            tracks: Arc::new(TrackStore::new(layout.clone(), gate.clone())),
            images: Arc::new(ImageStore::new(layout, gate)),
            db,
            config,
        })
    }
}

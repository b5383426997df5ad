use tracing::{info, instrument};

use crate::error::{MediaError, MediaResult};
use crate::fsops;
use crate::gate::OwnershipGate;
use crate::layout::{MediaLayout, TRACK_EXTENSION, extension_of};

/// Stores at most one GPX track per route.
///
/// Uploads replace the previous track atomically; there is no versioning.
#[derive(Debug, Clone)]
pub struct TrackStore {
    layout: MediaLayout,
    gate: OwnershipGate,
}

impl TrackStore {
    pub fn new(layout: MediaLayout, gate: OwnershipGate) -> Self {
        Self { layout, gate }
    }

    /// Store (or replace) the track of `route_id`.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn store(
        &self,
        caller: &str,
        route_id: i32,
        data: &[u8],
        file_name: &str,
    ) -> MediaResult<()> {
        self.gate.authorize(caller, route_id).await?;

        if data.is_empty() {
            return Err(MediaError::EmptyFile);
        }

        match extension_of(file_name) {
            Some(ext) if ext == TRACK_EXTENSION => {}
            _ => {
                return Err(MediaError::UnsupportedFormat(format!(
                    "only .{TRACK_EXTENSION} files are allowed, got '{file_name}'"
                )));
            }
        }

        let path = self.layout.track_path(route_id);
        fsops::write_atomic(&self.layout, &path, data).await?;

        info!(route_id, "Stored track");
        Ok(())
    }

    /// Read the track of `route_id`. No authorization.
    pub async fn fetch(&self, route_id: i32) -> MediaResult<Vec<u8>> {
        let path = self.layout.track_path(route_id);
        fsops::read_file(&path, || {
            format!("GPX file not found for camping route with id {route_id}")
        })
        .await
    }

    /// Delete the track of `route_id`.
    #[instrument(skip(self))]
    pub async fn delete(&self, caller: &str, route_id: i32) -> MediaResult<()> {
        self.gate.authorize(caller, route_id).await?;

        let path = self.layout.track_path(route_id);
        fsops::remove_file(&path, || {
            format!("GPX file does not exist for camping route with id {route_id}")
        })
        .await?;

        info!(route_id, "Deleted track");
        Ok(())
    }
}

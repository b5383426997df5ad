use tracing::info;

use crate::error::MediaResult;
use crate::image::ImageStore;
use crate::track::TrackStore;

/// Remove every piece of media attached to `route_id`.
///
/// Called by the route owner's delete flow before the route row goes away,
/// since both stores still authorize against it. Missing media is fine here;
/// any other failure is returned and the caller should keep the route.
pub async fn purge_route_media(
    tracks: &TrackStore,
    images: &ImageStore,
    caller: &str,
    route_id: i32,
) -> MediaResult<()> {
    ignore_missing(tracks.delete(caller, route_id).await)?;
    ignore_missing(images.delete_all(caller, route_id).await)?;

    info!(route_id, "Purged route media");
    Ok(())
}

fn ignore_missing(result: MediaResult<()>) -> MediaResult<()> {
    match result {
        Err(e) if e.is_not_found() => Ok(()),
        other => other,
    }
}

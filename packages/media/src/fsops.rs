use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use crate::error::{MediaError, MediaResult};
use crate::layout::MediaLayout;

/// Write `data` to `target` so readers only ever see the old or the new content.
///
/// The bytes are staged under the root's temp directory and renamed into place.
/// Missing parent directories are created; concurrent creation is not an error.
pub(crate) async fn write_atomic(
    layout: &MediaLayout,
    target: &Path,
    data: &[u8],
) -> MediaResult<()> {
    fs::create_dir_all(layout.temp_dir()).await?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = layout.temp_path();
    if let Err(e) = fs::write(&temp_path, data).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }

    if let Err(e) = fs::rename(&temp_path, target).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }

    Ok(())
}

/// Read a regular file. Absent or unreadable files are `NotFound`.
pub(crate) async fn read_file(
    path: &Path,
    not_found: impl Fn() -> String,
) -> MediaResult<Vec<u8>> {
    let readable = match fs::metadata(path).await {
        Ok(meta) => meta.is_file(),
        Err(e) if is_missing_or_unreadable(&e) => false,
        Err(e) => return Err(e.into()),
    };
    if !readable {
        return Err(MediaError::NotFound(not_found()));
    }

    match fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if is_missing_or_unreadable(&e) => Err(MediaError::NotFound(not_found())),
        Err(e) => Err(e.into()),
    }
}

/// Remove a regular file. A missing file is `NotFound`.
pub(crate) async fn remove_file(
    path: &Path,
    not_found: impl Fn() -> String,
) -> MediaResult<()> {
    if !is_regular_file(path).await? {
        return Err(MediaError::NotFound(not_found()));
    }

    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(MediaError::NotFound(not_found())),
        Err(e) => Err(e.into()),
    }
}

pub(crate) async fn is_regular_file(path: &Path) -> MediaResult<bool> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub(crate) async fn is_dir(path: &Path) -> MediaResult<bool> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn is_missing_or_unreadable(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied)
}

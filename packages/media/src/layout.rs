use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{MediaError, MediaResult};

/// Extension accepted for track uploads and used for the stored track file.
pub const TRACK_EXTENSION: &str = "gpx";

const TRACKS_DIR: &str = "tracks";
const IMAGES_DIR: &str = "images";
const TRACK_FILE_NAME: &str = "track.gpx";
/// Staging area for atomic writes. Lives under the root so renames stay on one filesystem.
const TEMP_DIR: &str = ".tmp";

/// Kind of media attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Track,
    Image,
}

/// Maps `(kind, route id, name)` to absolute paths under the media root.
///
/// Owns no state beyond the root and performs no I/O.
#[derive(Debug, Clone)]
pub struct MediaLayout {
    root: PathBuf,
}

impl MediaLayout {
    /// Build a layout rooted at `root`, made absolute and lexically normalized.
    pub fn new(root: impl AsRef<Path>) -> MediaResult<Self> {
        let root = std::path::absolute(root.as_ref())?;
        Ok(Self {
            root: normalize(&root),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the path for a piece of media.
    ///
    /// Tracks have a fixed file name, so `name` is ignored for [`MediaKind::Track`].
    /// For images, `None` yields the per-route image directory and `Some(name)` the
    /// named file, after the traversal guard has accepted `name`.
    pub fn path_for(
        &self,
        kind: MediaKind,
        route_id: i32,
        name: Option<&str>,
    ) -> MediaResult<PathBuf> {
        match (kind, name) {
            (MediaKind::Track, _) => Ok(self.track_path(route_id)),
            (MediaKind::Image, None) => Ok(self.image_dir(route_id)),
            (MediaKind::Image, Some(name)) => self.image_path(route_id, name),
        }
    }

    pub fn track_dir(&self, route_id: i32) -> PathBuf {
        self.root.join(TRACKS_DIR).join(route_id.to_string())
    }

    pub fn track_path(&self, route_id: i32) -> PathBuf {
        self.track_dir(route_id).join(TRACK_FILE_NAME)
    }

    pub fn image_dir(&self, route_id: i32) -> PathBuf {
        self.root.join(IMAGES_DIR).join(route_id.to_string())
    }

    /// Path of a single image. Fails with `InvalidPath` unless `name` resolves to a
    /// direct child of the route's image directory.
    pub fn image_path(&self, route_id: i32, name: &str) -> MediaResult<PathBuf> {
        let name = validate_image_name(name)?;
        let dir = self.image_dir(route_id);
        let path = dir.join(name);

        if path.parent() != Some(dir.as_path())
            || path.file_name().and_then(|n| n.to_str()) != Some(name)
        {
            return Err(MediaError::InvalidPath(name.to_string()));
        }

        Ok(path)
    }

    /// A fresh staging path for an atomic write.
    pub(crate) fn temp_path(&self) -> PathBuf {
        self.temp_dir().join(Uuid::new_v4().to_string())
    }

    pub(crate) fn temp_dir(&self) -> PathBuf {
        self.root.join(TEMP_DIR)
    }
}

/// Accept only flat, visible file names.
fn validate_image_name(name: &str) -> MediaResult<&str> {
    let invalid = || MediaError::InvalidPath(name.to_string());

    if name.trim().is_empty() {
        return Err(invalid());
    }
    // Control characters cover NUL as well as CR/LF.
    if name.chars().any(|c| c.is_ascii_control()) {
        return Err(invalid());
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid());
    }
    // Generated names never start with a dot; this also rejects `.` and `..`.
    if name.starts_with('.') {
        return Err(invalid());
    }
    if Path::new(name).is_absolute() {
        return Err(invalid());
    }

    Ok(name)
}

/// Generate a collision-resistant image name, keeping the original extension.
pub(crate) fn generate_image_name(original_name: Option<&str>) -> String {
    let id = Uuid::new_v4().simple();
    match original_name.and_then(extension_of) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Lower-cased extension of `file_name`, if it has a usable one.
pub(crate) fn extension_of(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Lexical normalization: drops `.` components and folds `..` into its parent.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

use std::io::ErrorKind;

use tokio::fs;
use tracing::{info, instrument, warn};

use crate::error::{MediaError, MediaResult};
use crate::fsops;
use crate::gate::OwnershipGate;
use crate::layout::{MediaLayout, generate_image_name};

/// A single file of a bulk image upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Name the client sent; only its extension is kept.
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Stores any number of photos per route, each under a generated name.
///
/// The route's image directory is the only record of which images exist.
#[derive(Debug, Clone)]
pub struct ImageStore {
    layout: MediaLayout,
    gate: OwnershipGate,
}

impl ImageStore {
    pub fn new(layout: MediaLayout, gate: OwnershipGate) -> Self {
        Self { layout, gate }
    }

    /// Store a batch of images and return their generated names in input order.
    ///
    /// Files are written one after another. A failure on item *k* aborts the call
    /// but leaves items before it stored.
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn store_many(
        &self,
        caller: &str,
        route_id: i32,
        files: &[UploadFile],
    ) -> MediaResult<Vec<String>> {
        self.gate.authorize(caller, route_id).await?;

        info!(route_id, count = files.len(), "Storing images");

        let mut names = Vec::with_capacity(files.len());
        for file in files {
            if file.bytes.is_empty() {
                warn!(
                    route_id,
                    stored = names.len(),
                    file_name = file.file_name.as_deref().unwrap_or(""),
                    "Empty file in image batch"
                );
                return Err(MediaError::EmptyFile);
            }

            let name = generate_image_name(file.file_name.as_deref());
            let path = self.layout.image_path(route_id, &name)?;
            fsops::write_atomic(&self.layout, &path, &file.bytes).await?;
            names.push(name);
        }

        Ok(names)
    }

    /// Names of the images stored for `route_id`, in directory enumeration order.
    ///
    /// `NotFound` if the route has no image directory; an empty directory yields an empty list.
    pub async fn list_names(&self, route_id: i32) -> MediaResult<Vec<String>> {
        let dir = self.layout.image_dir(route_id);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Err(MediaError::NotFound(format!(
                    "Could not find images for camping route with id {route_id}"
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    /// Read one image. No authorization.
    pub async fn fetch(&self, route_id: i32, name: &str) -> MediaResult<Vec<u8>> {
        let path = self.layout.image_path(route_id, name)?;
        fsops::read_file(&path, || format!("Could not find and read file {name}")).await
    }

    /// Delete one image.
    #[instrument(skip(self))]
    pub async fn delete_one(&self, caller: &str, route_id: i32, name: &str) -> MediaResult<()> {
        self.gate.authorize(caller, route_id).await?;

        let path = self.layout.image_path(route_id, name)?;
        fsops::remove_file(&path, || format!("File {name} does not exist")).await?;

        info!(route_id, name, "Deleted image");
        Ok(())
    }

    /// Delete every image of `route_id` and the directory itself.
    ///
    /// Children are removed before their parent. A failure part-way through is a
    /// `Storage` error and may leave some files behind.
    #[instrument(skip(self))]
    pub async fn delete_all(&self, caller: &str, route_id: i32) -> MediaResult<()> {
        self.gate.authorize(caller, route_id).await?;

        let dir = self.layout.image_dir(route_id);
        if !fsops::is_dir(&dir).await? {
            return Err(MediaError::NotFound(format!(
                "Images could not be found for camping route with id {route_id}"
            )));
        }

        fs::remove_dir_all(&dir).await?;

        info!(route_id, "Deleted all images");
        Ok(())
    }
}

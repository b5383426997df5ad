use thiserror::Error;

/// Errors returned by the media stores.
///
/// Every variant is surfaced to the caller unchanged; the stores never retry
/// and never swallow a failure.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The referenced route does not exist.
    #[error("camping route {0} does not exist")]
    RouteNotFound(i32),
    /// The caller is not the owner of the route.
    #[error("you are not permitted to do this action")]
    NotPermitted,
    /// An uploaded file has zero bytes.
    #[error("encountered empty file")]
    EmptyFile,
    /// Track upload with an extension other than `gpx`.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    /// A caller-supplied file name would escape the per-route directory.
    #[error("invalid file name: {0}")]
    InvalidPath(String),
    /// The requested track, image or image directory does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Any underlying I/O failure not covered above.
    #[error("media storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

impl MediaError {
    /// Whether this error means "nothing there", as opposed to a refusal or failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type MediaResult<T> = Result<T, MediaError>;

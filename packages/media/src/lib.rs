//! Route-scoped media storage for camping routes.
//!
//! Tracks (one GPX file per route) and photos (any number per route) live on
//! the local filesystem under a single configured root:
//!
//! ```text
//! <root>/tracks/<route_id>/track.gpx
//! <root>/images/<route_id>/<generated-name>.<ext>
//! ```
//!
//! Mutations go through the [`OwnershipGate`] first; reads are public.

mod config;
mod error;
mod fsops;
mod gate;
mod image;
mod layout;
mod lifecycle;
mod track;

#[cfg(test)]
mod test_support;

pub use config::MediaConfig;
pub use error::{MediaError, MediaResult};
pub use gate::{LookupError, OwnershipGate, RouteLookup, RouteRef};
pub use image::{ImageStore, UploadFile};
pub use layout::{MediaKind, MediaLayout, TRACK_EXTENSION};
pub use lifecycle::purge_route_media;
pub use track::TrackStore;

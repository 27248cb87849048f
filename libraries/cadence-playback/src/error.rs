//! Error types for the player

use crate::types::TrackId;
use thiserror::Error;

/// Catalog construction and loading errors
///
/// A malformed catalog is a startup precondition violation; these are
/// raised once at load time and never during playback.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog has no tracks
    #[error("Catalog is empty")]
    Empty,

    /// Two tracks share the same id
    #[error("Duplicate track id: {0}")]
    DuplicateId(TrackId),

    /// A track has an empty id
    #[error("Track \"{title}\" has an empty id")]
    EmptyId { title: String },

    /// Catalog file could not be parsed
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Media playback surface errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The surface refused to start playback (e.g. autoplay policy)
    #[error("Playback rejected: {0}")]
    Rejected(String),

    /// No surface could be created in this environment
    #[error("Media surface unavailable")]
    Unavailable,

    /// Backend-specific failure
    #[error("Media surface error: {0}")]
    Backend(String),
}

/// Player errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track id not present in the catalog
    #[error("Unknown track id: {0}")]
    UnknownTrack(TrackId),

    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Surface error
    #[error("Media surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// The player loop has stopped and no longer accepts input
    #[error("Player has shut down")]
    Closed,
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

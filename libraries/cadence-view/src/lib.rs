//! Cadence - Presentation Contract
//!
//! Pure functions from a [`PlayerSnapshot`] to display values, and the
//! [`Intent`]s the controls emit. Nothing in this crate holds state; a
//! front-end rebuilds its views from every snapshot it receives.
//!
//! # Example
//!
//! ```rust
//! use cadence_playback::{Catalog, PlayerConfig, PlayerMachine};
//! use cadence_view::{ControlsView, PlaylistView, format_time};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let catalog = Arc::new(Catalog::demo());
//! let machine = PlayerMachine::new(Arc::clone(&catalog), &PlayerConfig::default());
//! let snapshot = machine.snapshot();
//!
//! let controls = ControlsView::new(&snapshot);
//! assert_eq!(controls.duration_label, "6:12");
//!
//! let playlist = PlaylistView::new(&catalog, &snapshot.state);
//! assert!(playlist.rows[0].is_active);
//! assert!(!playlist.rows[0].is_playing);
//!
//! assert_eq!(format_time(Duration::from_secs(65)), "1:05");
//! ```

mod controls;
mod format;
mod playlist;
mod text;

pub use cadence_playback::{Intent, PlayerSnapshot};
pub use controls::{ControlsView, PlayGlyph, VolumeGlyph};
pub use format::{fill_percent, format_secs, format_time};
pub use playlist::{PlaylistRow, PlaylistView, RowIndicator};
pub use text::{render_status, render_text};

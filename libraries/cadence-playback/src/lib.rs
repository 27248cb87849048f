//! Cadence - Playback Core
//!
//! Playback state machine and clock synchronization for the Cadence
//! player widget.
//!
//! This crate provides:
//! - Validated track catalog (TOML/JSON loading, built-in demo catalog)
//! - Single-track player state (play/pause, elapsed time, volume)
//! - Wrap-around next/previous navigation and auto-advance
//! - Clamped seeking and volume, mute toggle
//! - Two clock strategies: a simulated timer and a real media surface
//! - Stale-callback protection through binding generations
//! - Browser bindings behind the `wasm` feature
//!
//! # Architecture
//!
//! [`PlayerMachine`] is synchronous and owns the only [`PlayerState`].
//! [`Player`] feeds it intents and clock signals from one queue, one at a
//! time, and pushes a coalesced [`SyncPlan`] into the bound
//! [`PlaybackClock`] after each input. Presentation code reads
//! [`PlayerSnapshot`]s and sends [`Intent`]s through a [`PlayerHandle`].
//!
//! Decoding and audio output are not done here. Real playback is delegated
//! to a [`MediaSurface`] implementation.
//!
//! # Example: State Machine
//!
//! ```rust
//! use cadence_playback::{Catalog, PlayerConfig, PlayerMachine};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let catalog = Arc::new(Catalog::demo());
//! let mut machine = PlayerMachine::new(catalog, &PlayerConfig::default());
//!
//! machine.toggle_play();
//! machine.tick(Duration::from_secs(1));
//! assert_eq!(machine.state().current_time, Duration::from_secs(1));
//!
//! machine.next();
//! assert_eq!(machine.state().current_track_id.as_str(), "2");
//! assert_eq!(machine.state().current_time, Duration::ZERO);
//! ```
//!
//! # Example: Player Loop
//!
//! ```rust,no_run
//! use cadence_playback::{Catalog, Player, PlayerConfig, SimulatedClock};
//! use std::sync::Arc;
//!
//! # async fn demo() -> cadence_playback::Result<()> {
//! let config = PlayerConfig::default();
//! let clock = SimulatedClock::new(config.tick_period);
//! let (player, handle) = Player::new(Arc::new(Catalog::demo()), &config, clock);
//! tokio::spawn(player.run());
//!
//! handle.toggle_play()?;
//! handle.set_volume(40)?;
//! println!("{:?}", handle.snapshot().state);
//! handle.shutdown()?;
//! # Ok(())
//! # }
//! ```

mod catalog;
pub mod clock;
mod error;
mod events;
mod input;
mod machine;
mod player;
mod surface;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use catalog::Catalog;
#[cfg(feature = "runtime")]
pub use clock::SimulatedClock;
pub use clock::{ClockContext, PlaybackClock, SurfaceClock};
pub use error::{CatalogError, PlaybackError, Result, SurfaceError};
pub use events::{PlayerEvent, SyncPlan};
pub use input::{ClockSignal, Intent, PlayerInput, SignalSender};
pub use machine::PlayerMachine;
pub use player::{Player, PlayerCore, PlayerHandle};
pub use surface::{MediaSurface, StartRequest, SurfaceEvents};
pub use types::{PlayerConfig, PlayerSnapshot, PlayerState, Track, TrackId};

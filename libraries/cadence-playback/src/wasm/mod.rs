//! WASM bindings for cadence-playback
//!
//! Browser implementations of the clock strategies (an `<audio>` element
//! surface and a `setInterval` timer) plus a JavaScript-facing player.

mod audio_element;
mod interval_clock;
mod player;
mod types;

pub use audio_element::AudioElementSurface;
pub use interval_clock::IntervalClock;
pub use player::WasmPlayer;
pub use types::{WasmPlayerState, WasmTrack};

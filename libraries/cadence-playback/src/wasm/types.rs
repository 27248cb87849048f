//! WASM-compatible type definitions
//!
//! Plain serde structs with JS-friendly field names and `f64` seconds,
//! converted to JS objects with `serde-wasm-bindgen`.

use crate::{PlayerSnapshot, Track};
use serde::{Deserialize, Serialize};

/// Track as seen from JavaScript
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WasmTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album_art: String,
    pub duration: f64,
    pub url: Option<String>,
}

impl From<&Track> for WasmTrack {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.to_string(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album_art: track.album_art.clone(),
            duration: track.duration.as_secs_f64(),
            url: track.url.clone(),
        }
    }
}

/// Player state passed to `onStateChange` callbacks
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WasmPlayerState {
    pub is_playing: bool,
    pub current_time: f64,
    pub current_track_id: String,
    pub volume: u8,
    pub track: WasmTrack,
}

impl From<&PlayerSnapshot> for WasmPlayerState {
    fn from(snapshot: &PlayerSnapshot) -> Self {
        Self {
            is_playing: snapshot.state.is_playing,
            current_time: snapshot.state.current_time.as_secs_f64(),
            current_track_id: snapshot.state.current_track_id.to_string(),
            volume: snapshot.state.volume,
            track: WasmTrack::from(&snapshot.track),
        }
    }
}

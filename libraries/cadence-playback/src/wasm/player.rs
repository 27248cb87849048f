//! JavaScript-facing player

use super::audio_element::AudioElementSurface;
use super::interval_clock::IntervalClock;
use super::types::{WasmPlayerState, WasmTrack};
use crate::{
    Catalog, PlaybackClock, PlaybackError, Player, PlayerConfig, PlayerHandle, SurfaceClock,
    Track,
};
use js_sys::Function;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

/// Player widget core for the browser
///
/// Runs the player loop on the browser's microtask queue. State changes
/// are pushed to the callback registered with `onStateChange`.
#[wasm_bindgen]
pub struct WasmPlayer {
    handle: PlayerHandle,
    on_state_change: Rc<RefCell<Option<Function>>>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player
    ///
    /// `tracks` is an array of `{id, title, artist, albumArt, duration, url?}`
    /// objects; `null`/`undefined` selects the demo catalog. With
    /// `useAudioElement` the player drives a real `<audio>` element (tracks
    /// without a `url` still tick on a one-second interval), otherwise time
    /// is simulated for every track.
    #[wasm_bindgen(constructor)]
    pub fn new(tracks: JsValue, use_audio_element: bool) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let catalog = if tracks.is_null() || tracks.is_undefined() {
            Catalog::demo()
        } else {
            let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;
            Catalog::new(tracks).map_err(|e| handle_error(e.into()))?
        };

        let config = PlayerConfig::default();
        let clock: Box<dyn PlaybackClock> = if use_audio_element {
            let surface = AudioElementSurface::new().map_err(|e| handle_error(e.into()))?;
            Box::new(
                SurfaceClock::new(surface).with_fallback(IntervalClock::new(config.tick_period)),
            )
        } else {
            Box::new(IntervalClock::new(config.tick_period))
        };

        let (player, handle) = Player::new(Arc::new(catalog), &config, clock);
        wasm_bindgen_futures::spawn_local(player.run());

        let on_state_change: Rc<RefCell<Option<Function>>> = Rc::new(RefCell::new(None));
        let mut snapshots = handle.subscribe();
        let callback = Rc::clone(&on_state_change);
        wasm_bindgen_futures::spawn_local(async move {
            while snapshots.changed().await.is_ok() {
                let state = WasmPlayerState::from(&*snapshots.borrow_and_update());
                // The handler may register a new handler while it runs
                let cb = callback.borrow().clone();
                if let Some(cb) = cb {
                    if let Ok(value) = serde_wasm_bindgen::to_value(&state) {
                        cb.call1(&JsValue::NULL, &value).ok();
                    }
                }
            }
        });

        Ok(Self {
            handle,
            on_state_change,
        })
    }

    // ===== Playback Control =====

    /// Toggle play/pause
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&self) -> Result<(), JsValue> {
        self.handle.toggle_play().map_err(handle_error)
    }

    /// Skip to next track
    pub fn next(&self) -> Result<(), JsValue> {
        self.handle.next().map_err(handle_error)
    }

    /// Go to previous track
    pub fn previous(&self) -> Result<(), JsValue> {
        self.handle.previous().map_err(handle_error)
    }

    /// Select a track by id and start it from the beginning
    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&self, id: &str) -> Result<(), JsValue> {
        self.handle.select_track(id).map_err(handle_error)
    }

    /// Seek to position in seconds
    pub fn seek(&self, position_secs: f64) -> Result<(), JsValue> {
        self.handle
            .seek(crate::types::duration_from_secs_lossy(position_secs))
            .map_err(handle_error)
    }

    // ===== Volume Control =====

    /// Set volume (0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: u8) -> Result<(), JsValue> {
        self.handle.set_volume(level).map_err(handle_error)
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) -> Result<(), JsValue> {
        self.handle.toggle_mute().map_err(handle_error)
    }

    // ===== State Queries =====
    //
    // Intents are applied by the player loop on a later microtask, so right
    // after e.g. `togglePlay()` these still return the previous state. Use
    // `onStateChange` to observe the result of an intent.

    /// Play flag from the last published snapshot
    #[wasm_bindgen(getter, js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.handle.snapshot().state.is_playing
    }

    /// Elapsed time in seconds, as of the last published snapshot
    #[wasm_bindgen(getter, js_name = currentTime)]
    pub fn current_time(&self) -> f64 {
        self.handle.snapshot().state.current_time.as_secs_f64()
    }

    #[wasm_bindgen(getter, js_name = currentTrackId)]
    pub fn current_track_id(&self) -> String {
        self.handle.snapshot().state.current_track_id.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn volume(&self) -> u8 {
        self.handle.snapshot().state.volume
    }

    /// Last published state object (same shape as the `onStateChange` payload)
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        let state = WasmPlayerState::from(&self.handle.snapshot());
        serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
    }

    /// Catalog tracks in playlist order
    #[wasm_bindgen(js_name = getTracks)]
    pub fn get_tracks(&self) -> JsValue {
        let tracks: Vec<WasmTrack> = self
            .handle
            .catalog()
            .tracks()
            .iter()
            .map(WasmTrack::from)
            .collect();
        serde_wasm_bindgen::to_value(&tracks).unwrap_or(JsValue::NULL)
    }

    // ===== Event Listeners =====

    /// Register state change callback
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&self, callback: Function) {
        *self.on_state_change.borrow_mut() = Some(callback);
    }
}

impl Drop for WasmPlayer {
    fn drop(&mut self) {
        self.handle.shutdown().ok();
    }
}

fn handle_error(error: PlaybackError) -> JsValue {
    tracing::warn!(%error, "Player call failed");
    JsValue::from_str(&error.to_string())
}

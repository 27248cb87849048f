//! Player state machine
//!
//! Owns the single [`PlayerState`] and applies intents and clock signals
//! to it. The machine is synchronous and knows nothing about timers or
//! media elements; it only records what changed as [`PlayerEvent`]s.

use crate::{
    catalog::Catalog,
    error::{PlaybackError, Result},
    events::PlayerEvent,
    types::{
        duration_from_secs_lossy, PlayerConfig, PlayerSnapshot, PlayerState, Track, TrackId,
        MAX_VOLUME, UNMUTE_VOLUME,
    },
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Playback state machine
///
/// Besides the state itself the machine keeps a *generation* counter that
/// is bumped whenever the `(current track, playing)` pair changes. Clock
/// bindings and asynchronous start requests are tagged with it, which lets
/// the driver tell a late callback from a current one.
pub struct PlayerMachine {
    catalog: Arc<Catalog>,
    state: PlayerState,
    generation: u64,

    // Event queue for UI and clock synchronization
    pending_events: Vec<PlayerEvent>,
}

impl PlayerMachine {
    /// Create a machine positioned on the first catalog entry, paused at 0
    pub fn new(catalog: Arc<Catalog>, config: &PlayerConfig) -> Self {
        let state = PlayerState {
            is_playing: false,
            current_time: Duration::ZERO,
            current_track_id: catalog.first().id.clone(),
            volume: config.initial_volume.min(MAX_VOLUME),
        };

        Self {
            catalog,
            state,
            generation: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== Accessors =====

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Current binding generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current track, or the first catalog entry if the id does not resolve
    pub fn current_track(&self) -> &Track {
        self.catalog.resolve(&self.state.current_track_id)
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state.clone(),
            track: self.current_track().clone(),
        }
    }

    // ===== Playback Control =====

    /// Flip the play/pause flag
    pub fn toggle_play(&mut self) {
        self.set_playing(!self.state.is_playing);
    }

    /// Make `id` current, restart it from zero and start playing
    ///
    /// Selecting the already-current track restarts it.
    pub fn select_track(&mut self, id: &TrackId) -> Result<()> {
        if self.catalog.get(id).is_none() {
            return Err(PlaybackError::UnknownTrack(id.clone()));
        }
        self.switch_to(id.clone());
        Ok(())
    }

    /// Advance to the next track, wrapping to the first
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let id = self.catalog.next_after(&self.state.current_track_id).id.clone();
        self.switch_to(id);
    }

    /// Go back to the previous track, wrapping to the last
    pub fn previous(&mut self) {
        let id = self
            .catalog
            .previous_before(&self.state.current_track_id)
            .id
            .clone();
        self.switch_to(id);
    }

    // ===== Seek =====

    /// Set the elapsed time, clamped to `[0, duration]`
    pub fn seek(&mut self, position: Duration) {
        let position = position.min(self.current_track().duration);
        self.state.current_time = position;
        self.pending_events.push(PlayerEvent::Seeked {
            position_ms: millis(position),
        });
    }

    /// Seek from a float seconds value (slider input)
    pub fn seek_secs(&mut self, secs: f64) {
        self.seek(duration_from_secs_lossy(secs));
    }

    // ===== Volume =====

    /// Set volume (0-100); larger values are capped at 100
    pub fn set_volume(&mut self, level: u8) {
        let level = level.min(MAX_VOLUME);
        if level == self.state.volume {
            return;
        }
        self.state.volume = level;
        self.pending_events.push(PlayerEvent::VolumeChanged { level });
    }

    /// Speaker button: mute when audible, otherwise restore to 50
    pub fn toggle_mute(&mut self) {
        let level = if self.state.volume == 0 { UNMUTE_VOLUME } else { 0 };
        self.set_volume(level);
    }

    // ===== Clock input =====

    /// Simulated clock step
    ///
    /// Adds `elapsed` while the track has time left, then auto-advances
    /// once if the end was reached. Ignored while paused.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.state.is_playing {
            return;
        }

        let duration = self.current_track().duration;
        if self.state.current_time < duration {
            self.state.current_time = self.state.current_time.saturating_add(elapsed);
            self.pending_events.push(PlayerEvent::PositionChanged {
                position_ms: millis(self.state.current_time),
            });
        }

        if self.state.current_time >= duration {
            self.auto_advance();
        }
    }

    /// The media surface reached end of media
    pub fn track_ended(&mut self) {
        self.auto_advance();
    }

    /// Mirror a position reported by the media surface
    ///
    /// The surface is authoritative for real playback so the value is not
    /// clamped to the nominal duration.
    pub fn report_time(&mut self, position: Duration) {
        if position == self.state.current_time {
            return;
        }
        self.state.current_time = position;
        self.pending_events.push(PlayerEvent::PositionChanged {
            position_ms: millis(position),
        });
    }

    /// A start-playback request was refused by the surface
    ///
    /// Reverts to paused if `generation` is still current and returns
    /// whether the rejection was applied.
    pub fn playback_rejected(&mut self, generation: u64, reason: &str) -> bool {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Ignoring stale playback rejection"
            );
            return false;
        }

        warn!(
            track = %self.state.current_track_id,
            reason,
            "Media surface rejected playback, pausing"
        );
        self.pending_events.push(PlayerEvent::PlaybackRejected {
            reason: reason.to_string(),
        });
        self.set_playing(false);
        true
    }

    // ===== Events =====

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn switch_to(&mut self, id: TrackId) {
        let previous_track_id = self.state.current_track_id.clone();
        let track_changed = previous_track_id != id;

        if track_changed {
            debug!(from = %previous_track_id, to = %id, "Switching track");
            self.state.current_track_id = id.clone();
            self.pending_events.push(PlayerEvent::TrackChanged {
                track_id: id,
                previous_track_id,
            });
            self.generation += 1;
        } else {
            self.pending_events.push(PlayerEvent::Seeked { position_ms: 0 });
        }

        self.state.current_time = Duration::ZERO;
        self.set_playing(true);
    }

    fn set_playing(&mut self, playing: bool) {
        if self.state.is_playing == playing {
            return;
        }
        self.state.is_playing = playing;
        self.generation += 1;
        self.pending_events
            .push(PlayerEvent::PlayStateChanged { is_playing: playing });
    }

    fn auto_advance(&mut self) {
        let finished = self.state.current_track_id.clone();
        debug!(track = %finished, "Track finished");
        self.pending_events
            .push(PlayerEvent::TrackFinished { track_id: finished });
        self.next();
    }
}

fn millis(position: Duration) -> u64 {
    u64::try_from(position.as_millis()).unwrap_or(u64::MAX)
}

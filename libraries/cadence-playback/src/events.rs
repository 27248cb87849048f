//! Player events
//!
//! Every state machine transition appends events to an internal queue.
//! The driver drains them after each input to publish a snapshot and to
//! build the [`SyncPlan`] handed to the bound clock.

use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Something observable changed in the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// A different track became current
    TrackChanged {
        track_id: TrackId,
        previous_track_id: TrackId,
    },

    /// Playback started or paused
    PlayStateChanged { is_playing: bool },

    /// Position was set explicitly (seek, or restart of the same track)
    Seeked { position_ms: u64 },

    /// Position advanced through a tick or a surface time report
    PositionChanged { position_ms: u64 },

    /// Volume level changed
    VolumeChanged { level: u8 },

    /// Current track reached its end and auto-advance ran
    TrackFinished { track_id: TrackId },

    /// The media surface refused to start playback
    PlaybackRejected { reason: String },
}

/// Coalesced set of changes the clock has to act on
///
/// Built from a batch of drained events; each flag is set if at least one
/// event of that kind occurred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub track_changed: bool,
    pub play_state_changed: bool,
    pub volume_changed: bool,
    pub seeked: bool,
    pub track_finished: bool,
}

impl SyncPlan {
    /// Plan covering every aspect, used for the initial bind
    pub fn full() -> Self {
        Self {
            track_changed: true,
            play_state_changed: true,
            volume_changed: true,
            seeked: true,
            track_finished: false,
        }
    }

    pub fn from_events(events: &[PlayerEvent]) -> Self {
        let mut plan = Self::default();
        for event in events {
            match event {
                PlayerEvent::TrackChanged { .. } => plan.track_changed = true,
                PlayerEvent::PlayStateChanged { .. } => plan.play_state_changed = true,
                PlayerEvent::VolumeChanged { .. } => plan.volume_changed = true,
                PlayerEvent::Seeked { .. } => plan.seeked = true,
                PlayerEvent::TrackFinished { .. } => plan.track_finished = true,
                PlayerEvent::PositionChanged { .. } | PlayerEvent::PlaybackRejected { .. } => {}
            }
        }
        plan
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the (track, playing) binding must be rebuilt
    pub fn rebinds(&self) -> bool {
        self.track_changed || self.play_state_changed || self.track_finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_from_events() {
        let events = vec![
            PlayerEvent::PositionChanged { position_ms: 1000 },
            PlayerEvent::VolumeChanged { level: 10 },
        ];
        let plan = SyncPlan::from_events(&events);
        assert!(plan.volume_changed);
        assert!(!plan.rebinds());
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_position_only_plan_is_empty() {
        let plan = SyncPlan::from_events(&[PlayerEvent::PositionChanged { position_ms: 5 }]);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let event = PlayerEvent::PlayStateChanged { is_playing: true };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"playStateChanged","is_playing":true}"#);
    }
}

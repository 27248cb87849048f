//! Now-playing controls view model

use crate::format::{fill_percent, format_time};
use cadence_playback::types::{duration_from_secs_lossy, MAX_VOLUME};
use cadence_playback::{Intent, PlayerSnapshot};
use serde::Serialize;

/// Icon on the main transport button
///
/// Shows the action the button performs, so a playing player shows `Pause`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayGlyph {
    Play,
    Pause,
}

/// Icon on the speaker (mute) button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeGlyph {
    /// Volume is 0
    Muted,
    /// Volume below 50
    Low,
    High,
}

impl VolumeGlyph {
    pub fn for_level(volume: u8) -> Self {
        match volume {
            0 => Self::Muted,
            1..=49 => Self::Low,
            _ => Self::High,
        }
    }
}

/// Everything the controls panel displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlsView {
    pub title: String,
    pub artist: String,
    pub album_art: String,

    /// Elapsed time label (`m:ss`)
    pub elapsed_label: String,

    /// Track length label (`m:ss`)
    pub duration_label: String,

    /// Seek slider maximum, in seconds
    pub seek_max: f64,

    /// Seek slider fill (0-100)
    pub seek_percent: f64,

    /// Volume slider fill (0-100)
    pub volume_percent: f64,

    pub is_playing: bool,
    pub play_glyph: PlayGlyph,
    pub volume_glyph: VolumeGlyph,
}

impl ControlsView {
    pub fn new(snapshot: &PlayerSnapshot) -> Self {
        let state = &snapshot.state;
        let track = &snapshot.track;
        let seek_max = track.duration.as_secs_f64();

        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album_art: track.album_art.clone(),
            elapsed_label: format_time(state.current_time),
            duration_label: format_time(track.duration),
            seek_max,
            seek_percent: fill_percent(state.current_time.as_secs_f64(), seek_max),
            volume_percent: fill_percent(f64::from(state.volume), f64::from(MAX_VOLUME)),
            is_playing: state.is_playing,
            play_glyph: if state.is_playing {
                PlayGlyph::Pause
            } else {
                PlayGlyph::Play
            },
            volume_glyph: VolumeGlyph::for_level(state.volume),
        }
    }

    // ===== Intents =====

    pub fn play_pause() -> Intent {
        Intent::TogglePlay
    }

    pub fn skip_forward() -> Intent {
        Intent::Next
    }

    pub fn skip_back() -> Intent {
        Intent::Previous
    }

    /// Seek slider moved to `value` seconds
    pub fn seek_to(value: f64) -> Intent {
        Intent::Seek(duration_from_secs_lossy(value))
    }

    /// Volume slider moved to `value` (0-100, rounded)
    pub fn volume_to(value: f64) -> Intent {
        let level = if value.is_nan() {
            0
        } else {
            value.round().clamp(0.0, f64::from(MAX_VOLUME)) as u8
        };
        Intent::SetVolume(level)
    }

    /// Speaker button pressed
    pub fn speaker() -> Intent {
        Intent::ToggleMute
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_playback::{PlayerState, Track};
    use std::time::Duration;

    fn snapshot(is_playing: bool, secs: u64, volume: u8) -> PlayerSnapshot {
        PlayerSnapshot {
            state: PlayerState {
                is_playing,
                current_time: Duration::from_secs(secs),
                current_track_id: "1".into(),
                volume,
            },
            track: Track::new("1", "Summer Vibes", "The Melodists", "art.jpg", 372),
        }
    }

    #[test]
    fn test_labels_and_fills() {
        let view = ControlsView::new(&snapshot(true, 93, 75));
        assert_eq!(view.elapsed_label, "1:33");
        assert_eq!(view.duration_label, "6:12");
        assert_eq!(view.seek_max, 372.0);
        assert!((view.seek_percent - 25.0).abs() < 1e-9);
        assert_eq!(view.volume_percent, 75.0);
        assert_eq!(view.play_glyph, PlayGlyph::Pause);
        assert_eq!(view.volume_glyph, VolumeGlyph::High);
    }

    #[test]
    fn test_paused_shows_play() {
        let view = ControlsView::new(&snapshot(false, 0, 75));
        assert_eq!(view.play_glyph, PlayGlyph::Play);
        assert!(!view.is_playing);
    }

    #[test]
    fn test_volume_glyph_thresholds() {
        assert_eq!(VolumeGlyph::for_level(0), VolumeGlyph::Muted);
        assert_eq!(VolumeGlyph::for_level(1), VolumeGlyph::Low);
        assert_eq!(VolumeGlyph::for_level(49), VolumeGlyph::Low);
        assert_eq!(VolumeGlyph::for_level(50), VolumeGlyph::High);
        assert_eq!(VolumeGlyph::for_level(100), VolumeGlyph::High);
    }

    #[test]
    fn test_slider_intents() {
        assert_eq!(
            ControlsView::seek_to(12.5),
            Intent::Seek(Duration::from_millis(12_500))
        );
        assert_eq!(ControlsView::seek_to(-1.0), Intent::Seek(Duration::ZERO));
        assert_eq!(ControlsView::volume_to(49.6), Intent::SetVolume(50));
        assert_eq!(ControlsView::volume_to(130.0), Intent::SetVolume(100));
        assert_eq!(ControlsView::volume_to(f64::NAN), Intent::SetVolume(0));
        assert_eq!(ControlsView::speaker(), Intent::ToggleMute);
    }
}

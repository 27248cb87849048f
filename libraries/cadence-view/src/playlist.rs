//! Playlist view model

use crate::format::format_time;
use cadence_playback::{Catalog, Intent, PlayerState, TrackId};
use serde::Serialize;

/// What a row shows over its thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowIndicator {
    /// Animated bars on the playing row
    Equalizer,
    Play,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistRow {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album_art: String,
    pub duration_label: String,

    /// Row is the current track
    pub is_active: bool,

    /// Row is the current track and playback is running
    pub is_playing: bool,

    pub indicator: RowIndicator,
}

impl PlaylistRow {
    /// Intent emitted when the row is clicked
    pub fn select(&self) -> Intent {
        Intent::SelectTrack(self.id.clone())
    }
}

/// The playlist panel: a header with the track count and one row per track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistView {
    pub count_label: String,
    pub rows: Vec<PlaylistRow>,
}

impl PlaylistView {
    pub fn new(catalog: &Catalog, state: &PlayerState) -> Self {
        let rows = catalog
            .tracks()
            .iter()
            .map(|track| {
                let is_active = track.id == state.current_track_id;
                let is_playing = is_active && state.is_playing;
                PlaylistRow {
                    id: track.id.clone(),
                    title: track.title.clone(),
                    artist: track.artist.clone(),
                    album_art: track.album_art.clone(),
                    duration_label: format_time(track.duration),
                    is_active,
                    is_playing,
                    indicator: if is_playing {
                        RowIndicator::Equalizer
                    } else {
                        RowIndicator::Play
                    },
                }
            })
            .collect::<Vec<_>>();

        let count_label = match rows.len() {
            1 => "1 track".to_string(),
            n => format!("{n} tracks"),
        };

        Self { count_label, rows }
    }

    pub fn active_row(&self) -> Option<&PlaylistRow> {
        self.rows.iter().find(|row| row.is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state(track: &str, is_playing: bool) -> PlayerState {
        PlayerState {
            is_playing,
            current_time: Duration::ZERO,
            current_track_id: track.into(),
            volume: 75,
        }
    }

    #[test]
    fn test_rows_flag_current_track() {
        let catalog = Catalog::demo();
        let view = PlaylistView::new(&catalog, &state("3", true));

        assert_eq!(view.count_label, "5 tracks");
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows.iter().filter(|r| r.is_active).count(), 1);

        let active = view.active_row().unwrap();
        assert_eq!(active.title, "Electric Soul");
        assert!(active.is_playing);
        assert_eq!(active.indicator, RowIndicator::Equalizer);
        assert_eq!(active.duration_label, "5:44");
    }

    #[test]
    fn test_paused_active_row_is_not_playing() {
        let view = PlaylistView::new(&Catalog::demo(), &state("1", false));
        let active = view.active_row().unwrap();
        assert!(active.is_active);
        assert!(!active.is_playing);
        assert_eq!(active.indicator, RowIndicator::Play);
        assert!(view.rows.iter().all(|r| !r.is_playing));
    }

    #[test]
    fn test_row_select_intent() {
        let view = PlaylistView::new(&Catalog::demo(), &state("1", false));
        assert_eq!(view.rows[4].select(), Intent::SelectTrack("5".into()));
    }
}

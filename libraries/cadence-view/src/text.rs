//! Plain-text rendering for terminals and logs

use crate::controls::{ControlsView, PlayGlyph, VolumeGlyph};
use crate::playlist::PlaylistView;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// One-line status: state, track, progress and volume
pub fn render_status(controls: &ControlsView) -> String {
    let state = match controls.play_glyph {
        PlayGlyph::Pause => "playing",
        PlayGlyph::Play => "paused",
    };
    let speaker = match controls.volume_glyph {
        VolumeGlyph::Muted => "muted",
        VolumeGlyph::Low => "vol-",
        VolumeGlyph::High => "vol+",
    };

    format!(
        "[{state}] {} - {}  {} {} {}  {speaker} {:.0}%",
        controls.title,
        controls.artist,
        controls.elapsed_label,
        bar(controls.seek_percent),
        controls.duration_label,
        controls.volume_percent,
    )
}

/// Status line followed by the playlist
///
/// The active row is marked with `>` and a playing row with `*`.
pub fn render_text(controls: &ControlsView, playlist: &PlaylistView) -> String {
    let mut out = render_status(controls);
    out.push('\n');
    let _ = writeln!(out, "Playlist ({})", playlist.count_label);

    for (index, row) in playlist.rows.iter().enumerate() {
        let marker = match (row.is_active, row.is_playing) {
            (true, true) => "*",
            (true, false) => ">",
            _ => " ",
        };
        let _ = writeln!(
            out,
            "{marker} {:>2}. {} - {} ({}) [{}]",
            index + 1,
            row.title,
            row.artist,
            row.duration_label,
            row.id,
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_bounds() {
        assert_eq!(bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(bar(100.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(50.0).matches('#').count(), BAR_WIDTH / 2);
    }
}

//! Core types for the player

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Unique identifier of a catalog track
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A playable catalog entry
///
/// Tracks are immutable once the catalog is built. `duration` is the
/// nominal length and is authoritative for the simulated clock even when
/// the real media turns out to be longer or shorter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique, non-empty identifier
    pub id: TrackId,

    /// Display title
    pub title: String,

    /// Display artist
    pub artist: String,

    /// Album art reference (URL or path)
    #[serde(alias = "albumArt")]
    pub album_art: String,

    /// Nominal length, stored as whole seconds
    #[serde(with = "whole_seconds")]
    pub duration: Duration,

    /// Media URL; tracks without one only play on the simulated clock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Track {
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        album_art: impl Into<String>,
        duration_secs: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album_art: album_art.into(),
            duration: Duration::from_secs(duration_secs),
            url: None,
        }
    }

    /// Attach a media URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Observable player state
///
/// There is exactly one of these per player and only the state machine
/// mutates it. Presentation code receives copies via [`PlayerSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Whether playback is running
    pub is_playing: bool,

    /// Elapsed time within the current track
    pub current_time: Duration,

    /// Currently selected track
    pub current_track_id: TrackId,

    /// Volume level (0-100)
    pub volume: u8,
}

/// Player configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Volume at startup (0-100)
    pub initial_volume: u8,

    /// Period of the simulated clock
    pub tick_period: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: DEFAULT_VOLUME,
            tick_period: Duration::from_secs(1),
        }
    }
}

/// Volume a fresh player starts with
pub const DEFAULT_VOLUME: u8 = 75;

/// Highest accepted volume level
pub const MAX_VOLUME: u8 = 100;

/// Volume restored by the mute toggle when unmuting
pub const UNMUTE_VOLUME: u8 = 50;

/// Point-in-time copy of the state plus the resolved current track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub state: PlayerState,
    pub track: Track,
}

/// Convert seconds coming from a float boundary (UI slider, media element)
/// into a `Duration`
///
/// Negative, NaN and zero inputs map to zero; values too large for a
/// `Duration` saturate.
pub fn duration_from_secs_lossy(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

mod whole_seconds {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_id_display() {
        let id = TrackId::new("42");
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.as_str(), "42");
        assert!(!id.is_empty());
        assert!(TrackId::new("").is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.initial_volume, 75);
        assert_eq!(config.tick_period, Duration::from_secs(1));
    }

    #[test]
    fn test_track_duration_serializes_as_seconds() {
        let track = Track::new("1", "Song", "Artist", "art.jpg", 372);
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["duration"], 372);
        assert!(json.get("url").is_none());

        let back: Track = serde_json::from_value(json).unwrap();
        assert_eq!(back, track);
    }

    #[test]
    fn test_track_accepts_camel_case_album_art() {
        let json = r#"{"id":"1","title":"T","artist":"A","albumArt":"x.png","duration":10}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.album_art, "x.png");
        assert_eq!(track.url, None);
    }

    #[test]
    fn test_duration_from_secs_lossy() {
        assert_eq!(duration_from_secs_lossy(-3.0), Duration::ZERO);
        assert_eq!(duration_from_secs_lossy(f64::NAN), Duration::ZERO);
        assert_eq!(duration_from_secs_lossy(1.5), Duration::from_millis(1500));
        assert_eq!(duration_from_secs_lossy(f64::INFINITY), Duration::MAX);
    }
}

//! Track catalog
//!
//! A fixed, ordered, non-empty list of tracks with unique ids. Order
//! defines next/previous wrap-around; lookups are always by id.

use crate::error::CatalogError;
use crate::types::{Track, TrackId};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Ordered, validated track list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

/// On-disk shape: a `tracks` array
#[derive(Debug, Deserialize)]
struct CatalogFile {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists, empty ids and duplicate ids
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if track.id.is_empty() {
                return Err(CatalogError::EmptyId {
                    title: track.title.clone(),
                });
            }
            if !seen.insert(&track.id) {
                return Err(CatalogError::DuplicateId(track.id.clone()));
            }
        }

        Ok(Self { tracks })
    }

    /// Parse a TOML catalog (`[[tracks]]` tables)
    pub fn from_toml_str(input: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(input).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(file.tracks)
    }

    /// Parse a JSON catalog (`{"tracks": [...]}`)
    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(input).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(file.tracks)
    }

    /// Load a catalog file; `.json` is parsed as JSON, anything else as TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };

        tracing::debug!(path = %path.display(), tracks = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Built-in five-track demo catalog
    pub fn demo() -> Self {
        const ENTRIES: [(&str, &str, &str, u32, u64, u32); 5] = [
            ("1", "Summer Vibes", "The Melodists", 10, 372, 1),
            ("2", "Midnight Dreams", "Luna Echo", 54, 425, 2),
            ("3", "Electric Soul", "Neon Waves", 145, 344, 3),
            ("4", "Ocean Breeze", "Coastal Sounds", 214, 324, 8),
            ("5", "Urban Jungle", "Metro Pulse", 129, 272, 9),
        ];

        let tracks = ENTRIES
            .iter()
            .map(|&(id, title, artist, art, secs, song)| {
                Track::new(
                    id,
                    title,
                    artist,
                    format!("https://picsum.photos/id/{art}/800/800"),
                    secs,
                )
                .with_url(format!(
                    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-{song}.mp3"
                ))
            })
            .collect();

        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    pub fn first(&self) -> &Track {
        &self.tracks[0]
    }

    /// Look up a track, falling back to the first entry when the id is unknown
    pub fn resolve(&self, id: &TrackId) -> &Track {
        self.get(id).unwrap_or_else(|| self.first())
    }

    /// Track after `id`, wrapping to the start
    pub fn next_after(&self, id: &TrackId) -> &Track {
        let i = self.index_of(id).unwrap_or(0);
        &self.tracks[(i + 1) % self.tracks.len()]
    }

    /// Track before `id`, wrapping to the end
    pub fn previous_before(&self, id: &TrackId) -> &Track {
        let n = self.tracks.len();
        let i = self.index_of(id).unwrap_or(0);
        &self.tracks[(i + n - 1) % n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn abc() -> Catalog {
        Catalog::new(vec![
            Track::new("a", "A", "x", "", 10),
            Track::new("b", "B", "x", "", 20),
            Track::new("c", "C", "x", "", 30),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(Catalog::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            Track::new("a", "A", "x", "", 10),
            Track::new("a", "A again", "x", "", 20),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id.as_str() == "a"));
    }

    #[test]
    fn test_rejects_empty_id() {
        let result = Catalog::new(vec![Track::new("", "Nameless", "x", "", 10)]);
        assert!(matches!(result, Err(CatalogError::EmptyId { title }) if title == "Nameless"));
    }

    #[test]
    fn test_navigation_wraps() {
        let catalog = abc();
        assert_eq!(catalog.next_after(&"a".into()).id.as_str(), "b");
        assert_eq!(catalog.next_after(&"c".into()).id.as_str(), "a");
        assert_eq!(catalog.previous_before(&"a".into()).id.as_str(), "c");
        assert_eq!(catalog.previous_before(&"b".into()).id.as_str(), "a");
    }

    #[test]
    fn test_unknown_id_falls_back_to_first() {
        let catalog = abc();
        let ghost = TrackId::new("ghost");
        assert_eq!(catalog.resolve(&ghost).id.as_str(), "a");
        assert_eq!(catalog.next_after(&ghost).id.as_str(), "b");
        assert_eq!(catalog.previous_before(&ghost).id.as_str(), "c");
    }

    #[test]
    fn test_single_track_wraps_to_itself() {
        let catalog = Catalog::new(vec![Track::new("solo", "S", "x", "", 5)]).unwrap();
        let id = TrackId::new("solo");
        assert_eq!(catalog.next_after(&id).id, id);
        assert_eq!(catalog.previous_before(&id).id, id);
    }

    #[test]
    fn test_demo_catalog() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.first().title, "Summer Vibes");
        assert_eq!(catalog.first().duration, Duration::from_secs(372));
        assert!(catalog.tracks().iter().all(|t| t.url.is_some()));
        // Demo data must satisfy the same rules as loaded data
        assert!(Catalog::new(catalog.tracks().to_vec()).is_ok());
    }

    #[test]
    fn test_from_toml() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[tracks]]
            id = "1"
            title = "One"
            artist = "Someone"
            album_art = "one.png"
            duration = 61

            [[tracks]]
            id = "2"
            title = "Two"
            artist = "Someone"
            album_art = "two.png"
            duration = 62
            url = "two.mp3"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.tracks()[1].url.as_deref(), Some("two.mp3"));
        assert_eq!(catalog.tracks()[0].duration, Duration::from_secs(61));
    }

    #[test]
    fn test_from_json_reports_parse_error() {
        let result = Catalog::from_json_str("{\"tracks\": 3}");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}

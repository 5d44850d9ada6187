use std::collections::BTreeMap;

use media_index::models::{artists, ArtistRow};
use serde::Serialize;

/// Key under which an artist's borrowed album artwork is stored.
pub const ARTIST_COVER: &str = "artist_cover";

/// A generic column-name to value record, the shape handed across the bridge.
///
/// Values are strings the way the media provider hands them out; a `None`
/// value is a null column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArtistRecord(BTreeMap<String, Option<String>>);

impl ArtistRecord {
    pub fn from_row(row: ArtistRow, cover: Option<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(artists::ID.to_string(), Some(row.id.to_string()));
        map.insert(artists::ARTIST.to_string(), row.artist);
        map.insert(
            artists::NUMBER_OF_TRACKS.to_string(),
            Some(row.number_of_tracks.to_string()),
        );
        map.insert(
            artists::NUMBER_OF_ALBUMS.to_string(),
            Some(row.number_of_albums.to_string()),
        );
        map.insert(ARTIST_COVER.to_string(), cover);

        Self(map)
    }

    /// Value of `column`, or `None` when it is null or missing.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).and_then(|value| value.as_deref())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn id(&self) -> Option<i64> {
        self.get(artists::ID).and_then(|id| id.parse().ok())
    }

    pub fn name(&self) -> Option<&str> {
        self.get(artists::ARTIST)
    }

    pub fn cover(&self) -> Option<&str> {
        self.get(ARTIST_COVER)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_deref()))
    }
}

impl From<ArtistRecord> for BTreeMap<String, Option<String>> {
    fn from(record: ArtistRecord) -> Self {
        record.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ArtistRow {
        ArtistRow {
            id: 12,
            artist: Some("Portishead".to_string()),
            number_of_tracks: 33,
            number_of_albums: 3,
        }
    }

    #[test]
    fn carries_projection_and_cover() {
        let record = ArtistRecord::from_row(row(), Some("/art/dummy.jpg".to_string()));

        assert_eq!(record.id(), Some(12));
        assert_eq!(record.name(), Some("Portishead"));
        assert_eq!(record.get(artists::NUMBER_OF_TRACKS), Some("33"));
        assert_eq!(record.get(artists::NUMBER_OF_ALBUMS), Some("3"));
        assert_eq!(record.cover(), Some("/art/dummy.jpg"));
        assert_eq!(record.columns().count(), 5);
    }

    #[test]
    fn missing_cover_serializes_as_null() {
        let record = ArtistRecord::from_row(row(), None);

        assert!(record.contains_column(ARTIST_COVER));
        assert_eq!(record.cover(), None);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json[ARTIST_COVER], serde_json::Value::Null);
        assert_eq!(json["artist"], "Portishead");
    }
}

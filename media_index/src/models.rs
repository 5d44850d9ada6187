pub mod artists {
    pub const TABLE: &str = "audio_artists";

    pub const ID: &str = "_id";
    pub const ARTIST: &str = "artist";
    pub const ARTIST_KEY: &str = "artist_key";
    pub const NUMBER_OF_TRACKS: &str = "number_of_tracks";
    pub const NUMBER_OF_ALBUMS: &str = "number_of_albums";

    pub const PROJECTION: [&str; 4] = [ID, ARTIST, NUMBER_OF_TRACKS, NUMBER_OF_ALBUMS];
}

pub mod albums {
    pub const TABLE: &str = "audio_albums";

    pub const ID: &str = "_id";
    pub const ALBUM: &str = "album";
    pub const ALBUM_KEY: &str = "album_key";
    pub const ARTIST: &str = "artist";
    pub const ALBUM_ART: &str = "album_art";
}

pub mod media {
    pub const TABLE: &str = "audio_media";

    pub const ID: &str = "_id";
    pub const TITLE: &str = "title";
    pub const ARTIST_ID: &str = "artist_id";
    pub const ARTIST: &str = "artist";
    pub const ALBUM_ID: &str = "album_id";
    pub const GENRE_NAME: &str = "genre_name";
}

/// One row of the artist table, restricted to [`artists::PROJECTION`].
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ArtistRow {
    #[sqlx(rename = "_id")]
    pub id: i64,
    pub artist: Option<String>,
    pub number_of_tracks: i64,
    pub number_of_albums: i64,
}

/// A `where` clause with `?` placeholders and the arguments bound to them.
///
/// The clause is caller-trusted text spliced into the statement as is. Only
/// the arguments go through binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    clause: Option<String>,
    args: Vec<String>,
}

impl Selection {
    /// Matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(clause: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            clause: Some(clause.into()),
            args,
        }
    }

    /// `column = ?`
    pub fn eq(column: &str, value: impl Into<String>) -> Self {
        Self::new(format!("{column} = ?"), vec![value.into()])
    }

    /// `column IN(?,?,...)`, or `column = ?` when there is a single value.
    ///
    /// An empty value list matches nothing.
    pub fn any_of(column: &str, values: Vec<String>) -> Self {
        match values.len() {
            0 => Self::new("0", Vec::new()),
            1 => Self::new(format!("{column} = ?"), values),
            n => {
                let placeholders = vec!["?"; n].join(",");
                Self::new(format!("{column} IN({placeholders})"), values)
            }
        }
    }

    /// `column` holds `fragment` as a plain substring. `%` and `_` in the
    /// fragment match themselves.
    pub fn contains(column: &str, fragment: &str) -> Self {
        let mut escaped = String::with_capacity(fragment.len());
        for c in fragment.chars() {
            if matches!(c, '\\' | '%' | '_') {
                escaped.push('\\');
            }
            escaped.push(c);
        }

        Self::new(
            format!("{column} LIKE ? ESCAPE '\\'"),
            vec![format!("%{escaped}%")],
        )
    }

    pub fn clause(&self) -> Option<&str> {
        self.clause.as_deref()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub(crate) fn where_sql(&self) -> String {
        match &self.clause {
            Some(clause) => format!(" where {clause}"),
            None => String::new(),
        }
    }
}

/// Sort orders understood by the artist table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArtistSort {
    #[default]
    Key,
    Name,
    NumberOfTracks,
    NumberOfAlbums,
}

impl ArtistSort {
    pub(crate) fn order_sql(self) -> &'static str {
        match self {
            ArtistSort::Key => " order by artist_key",
            ArtistSort::Name => " order by artist",
            ArtistSort::NumberOfTracks => " order by number_of_tracks desc",
            ArtistSort::NumberOfAlbums => " order by number_of_albums desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_uses_equality() {
        let selection = Selection::any_of(artists::ID, vec!["7".into()]);
        assert_eq!(selection.clause(), Some("_id = ?"));
        assert_eq!(selection.args(), ["7"]);
    }

    #[test]
    fn several_values_use_in_list() {
        let ids = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let selection = Selection::any_of(artists::ID, ids);
        assert_eq!(selection.clause(), Some("_id IN(?,?,?)"));
        assert_eq!(selection.args().len(), 3);
    }

    #[test]
    fn no_values_matches_nothing() {
        let selection = Selection::any_of(artists::ID, Vec::new());
        assert_eq!(selection.where_sql(), " where 0");
        assert!(selection.args().is_empty());
    }

    #[test]
    fn contains_escapes_wildcards() {
        let selection = Selection::contains(artists::ARTIST, r"100%_\");
        assert_eq!(selection.clause(), Some(r"artist LIKE ? ESCAPE '\'"));
        assert_eq!(selection.args(), [r"%100\%\_\\%"]);
    }

    #[test]
    fn all_has_no_where() {
        assert_eq!(Selection::all().where_sql(), "");
    }
}

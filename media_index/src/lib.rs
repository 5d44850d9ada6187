use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, instrument};

pub mod models;
mod schema;

pub use schema::name_key;

use models::{albums, artists, media, ArtistRow, ArtistSort, Selection};

#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub url: String,
    pub max_connections: u32,
}

impl IndexConfig {
    /// A private in-memory index. Every pooled connection to `sqlite::memory:`
    /// opens its own database, so the pool is held to a single connection.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://media_index.db".to_string(),
            max_connections: 4,
        }
    }
}

/// Handle to the media index. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct MediaIndex {
    pool: sqlx::Pool<sqlx::Sqlite>,
}

impl MediaIndex {
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        Self::connect_with(&IndexConfig {
            url: url.to_string(),
            ..Default::default()
        })
        .await
    }

    #[instrument(level = "trace")]
    pub async fn connect_with(config: &IndexConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub async fn create_schema(&self) -> Result<(), sqlx::Error> {
        for statement in schema::CREATE_STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("media index schema ready");

        Ok(())
    }

    /// Artist rows matching `selection`, in `sort` order.
    #[instrument(skip(self), level = "trace")]
    pub async fn query_artists(
        &self,
        selection: &Selection,
        sort: ArtistSort,
    ) -> Result<Vec<ArtistRow>, sqlx::Error> {
        let sql = format!(
            "select {} from {}{}{}",
            artists::PROJECTION.join(", "),
            artists::TABLE,
            selection.where_sql(),
            sort.order_sql(),
        );

        let mut query = sqlx::query_as::<_, ArtistRow>(&sql);
        for arg in selection.args() {
            query = query.bind(arg.as_str());
        }
        let rows = query.fetch_all(&self.pool).await?;
        debug!(n_rows = rows.len(), "fetched artists");

        Ok(rows)
    }

    /// Artwork paths of the albums credited to `artist`, in album key order.
    /// Albums without artwork yield `None`.
    #[instrument(skip(self), level = "trace")]
    pub async fn album_art_for_artist(
        &self,
        artist: &str,
    ) -> Result<Vec<Option<String>>, sqlx::Error> {
        let sql = format!(
            "select {art}, {artist} from {table} where {artist} = ? order by {key}",
            art = albums::ALBUM_ART,
            artist = albums::ARTIST,
            table = albums::TABLE,
            key = albums::ALBUM_KEY,
        );
        let rows: Vec<(Option<String>, Option<String>)> = sqlx::query_as(&sql)
            .bind(artist)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(art, _)| art).collect())
    }

    /// Distinct artist ids among the media tagged with `genre`.
    #[instrument(skip(self), level = "trace")]
    pub async fn artist_ids_for_genre(&self, genre: &str) -> Result<Vec<i64>, sqlx::Error> {
        let sql = format!(
            "select distinct {id} from {table} where {genre} = ? and {id} is not null order by {id}",
            id = media::ARTIST_ID,
            table = media::TABLE,
            genre = media::GENRE_NAME,
        );
        let rows: Vec<(i64,)> = sqlx::query_as(&sql)
            .bind(genre)
            .fetch_all(&self.pool)
            .await?;
        debug!(n_rows = rows.len(), "fetched genre artist ids");

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Inserts an artist row. `name` may be absent, as it can be in the
    /// provider's table.
    pub async fn insert_artist<'a>(
        &self,
        name: impl Into<Option<&'a str>>,
        number_of_tracks: i64,
        number_of_albums: i64,
    ) -> Result<i64, sqlx::Error> {
        let name = name.into();
        let sql = format!(
            "insert into {table}({artist}, {key}, {tracks}, {albums}) values (?, ?, ?, ?) returning {id}",
            table = artists::TABLE,
            artist = artists::ARTIST,
            key = artists::ARTIST_KEY,
            tracks = artists::NUMBER_OF_TRACKS,
            albums = artists::NUMBER_OF_ALBUMS,
            id = artists::ID,
        );
        let (id,): (i64,) = sqlx::query_as(&sql)
            .bind(name)
            .bind(name.map(name_key))
            .bind(number_of_tracks)
            .bind(number_of_albums)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    pub async fn insert_album(
        &self,
        title: &str,
        artist: &str,
        album_art: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!(
            "insert into {table}({album}, {key}, {artist}, {art}) values (?, ?, ?, ?) returning {id}",
            table = albums::TABLE,
            album = albums::ALBUM,
            key = albums::ALBUM_KEY,
            artist = albums::ARTIST,
            art = albums::ALBUM_ART,
            id = albums::ID,
        );
        let (id,): (i64,) = sqlx::query_as(&sql)
            .bind(title)
            .bind(name_key(title))
            .bind(artist)
            .bind(album_art)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    /// Inserts a track. Its artist name is copied from the artist row, and is
    /// null when `artist_id` points nowhere.
    pub async fn insert_media(
        &self,
        title: &str,
        artist_id: Option<i64>,
        album_id: Option<i64>,
        genre: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!(
            "
            insert into {table}({title}, {artist_id}, {artist}, {album_id}, {genre})
            values (?, ?, (select {artists_name} from {artists_table} where {artists_id} = ?), ?, ?)
            returning {id}
        ",
            table = media::TABLE,
            title = media::TITLE,
            artist_id = media::ARTIST_ID,
            artist = media::ARTIST,
            album_id = media::ALBUM_ID,
            genre = media::GENRE_NAME,
            artists_name = artists::ARTIST,
            artists_table = artists::TABLE,
            artists_id = artists::ID,
            id = media::ID,
        );
        let (id,): (i64,) = sqlx::query_as(&sql)
            .bind(title)
            .bind(artist_id)
            .bind(artist_id)
            .bind(album_id)
            .bind(genre)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }
}

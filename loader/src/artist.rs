use async_trait::async_trait;
use media_index::{
    models::{artists, ArtistSort, Selection},
    IndexConfig, MediaIndex,
};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::{record::ArtistRecord, sink::ResultSink, task::LoadTask, LoaderError};

/// Which artists a load should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistQuery {
    All,
    ByGenre(String),
    SearchByName(String),
    Where {
        selection: Selection,
        sort: ArtistSort,
    },
}

/// Entry point for artist requests. Every request runs on its own
/// background task and reports to the sink it was given.
#[derive(Debug, Clone)]
pub struct ArtistLoader {
    index: MediaIndex,
}

impl ArtistLoader {
    pub fn new(index: MediaIndex) -> Self {
        Self { index }
    }

    pub async fn open(config: &IndexConfig) -> Result<Self, LoaderError> {
        let index = MediaIndex::connect_with(config)
            .await
            .map_err(LoaderError::Open)?;

        Ok(Self::new(index))
    }

    pub fn index(&self) -> &MediaIndex {
        &self.index
    }

    /// All artists in the index, default sort.
    pub fn get_artists<S>(&self, sink: S) -> JoinHandle<()>
    where
        S: ResultSink<Vec<ArtistRecord>>,
    {
        self.create_load_task(ArtistQuery::All).execute(sink)
    }

    /// Artists with at least one track tagged `genre`.
    pub fn get_artists_by_genre<S>(&self, sink: S, genre: &str) -> JoinHandle<()>
    where
        S: ResultSink<Vec<ArtistRecord>>,
    {
        self.create_load_task(ArtistQuery::ByGenre(genre.to_string()))
            .execute(sink)
    }

    /// Artists whose name contains `name`.
    pub fn search_artists_by_name<S>(&self, sink: S, name: &str) -> JoinHandle<()>
    where
        S: ResultSink<Vec<ArtistRecord>>,
    {
        self.create_load_task(ArtistQuery::SearchByName(name.to_string()))
            .execute(sink)
    }

    pub fn get_artists_where<S>(
        &self,
        sink: S,
        selection: Selection,
        sort: ArtistSort,
    ) -> JoinHandle<()>
    where
        S: ResultSink<Vec<ArtistRecord>>,
    {
        self.create_load_task(ArtistQuery::Where { selection, sort })
            .execute(sink)
    }

    pub fn create_load_task(&self, query: ArtistQuery) -> ArtistLoadTask {
        ArtistLoadTask {
            index: self.index.clone(),
            query,
        }
    }
}

#[derive(Debug)]
pub struct ArtistLoadTask {
    index: MediaIndex,
    query: ArtistQuery,
}

#[async_trait]
impl LoadTask for ArtistLoadTask {
    type Output = Vec<ArtistRecord>;

    #[instrument(skip(self), fields(query = ?self.query), level = "trace")]
    async fn load_data(&self) -> Vec<ArtistRecord> {
        match &self.query {
            ArtistQuery::All => self.basic_data_load(&Selection::all(), ArtistSort::Key).await,
            ArtistQuery::ByGenre(genre) => {
                let ids = self.load_artist_ids_for_genre(genre).await;
                if ids.is_empty() {
                    return Vec::new();
                }

                let ids = ids.iter().map(ToString::to_string).collect();
                self.basic_data_load(&Selection::any_of(artists::ID, ids), ArtistSort::Key)
                    .await
            }
            ArtistQuery::SearchByName(name) => {
                self.basic_data_load(&Selection::contains(artists::ARTIST, name), ArtistSort::Key)
                    .await
            }
            ArtistQuery::Where { selection, sort } => self.basic_data_load(selection, *sort).await,
        }
    }
}

impl ArtistLoadTask {
    async fn basic_data_load(&self, selection: &Selection, sort: ArtistSort) -> Vec<ArtistRecord> {
        let rows = match self.index.query_artists(selection, sort).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, ?selection, "artist query failed");
                return Vec::new();
            }
        };

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            // some album artwork of this artist stands in as its cover
            let cover = self.artist_art_path(row.artist.as_deref()).await;
            records.push(ArtistRecord::from_row(row, cover));
        }
        debug!(n_records = records.len(), "loaded artists");

        records
    }

    /// First non-null artwork path among the artist's albums.
    async fn artist_art_path(&self, artist: Option<&str>) -> Option<String> {
        let artist = artist?;

        match self.index.album_art_for_artist(artist).await {
            Ok(paths) => paths.into_iter().flatten().next(),
            Err(error) => {
                warn!(%error, artist, "artwork query failed");
                None
            }
        }
    }

    async fn load_artist_ids_for_genre(&self, genre: &str) -> Vec<i64> {
        match self.index.artist_ids_for_genre(genre).await {
            Ok(ids) => ids,
            Err(error) => {
                warn!(%error, genre, "genre artist query failed");
                Vec::new()
            }
        }
    }
}

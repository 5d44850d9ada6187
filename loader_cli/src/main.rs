use std::{error::Error as _, process::ExitCode};

use clap::Parser;
use loader::{ArtistLoader, ArtistRecord, ArtistSort, IndexConfig, LoaderError, Selection};
use tokio::sync::oneshot;
use tracing::{debug, error, info};

#[derive(Debug, clap::Args)]
struct IndexArgs {
    #[arg(long, env = "MEDIA_INDEX_URL", default_value = "sqlite://media_index.db")]
    db: String,
    #[arg(long, env = "MEDIA_INDEX_MAX_CONNECTIONS", default_value_t = 4)]
    max_connections: u32,
}

impl From<&IndexArgs> for IndexConfig {
    fn from(args: &IndexArgs) -> Self {
        IndexConfig {
            url: args.db.clone(),
            max_connections: args.max_connections,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Sort {
    Key,
    Name,
    Tracks,
    Albums,
}

impl From<Sort> for ArtistSort {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Key => ArtistSort::Key,
            Sort::Name => ArtistSort::Name,
            Sort::Tracks => ArtistSort::NumberOfTracks,
            Sort::Albums => ArtistSort::NumberOfAlbums,
        }
    }
}

#[derive(Debug, clap::Parser)]
enum Command {
    /// List every artist in the index
    Artists {
        #[command(flatten)]
        index: IndexArgs,
        #[arg(short, long, value_enum, default_value = "key")]
        sort: Sort,
    },
    /// List the artists with tracks in a genre
    Genre {
        name: String,
        #[command(flatten)]
        index: IndexArgs,
    },
    /// List the artists whose name contains a fragment
    Search {
        name: String,
        #[command(flatten)]
        index: IndexArgs,
    },
    /// Create the media index tables
    Init {
        #[command(flatten)]
        index: IndexArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    {
        use tracing_subscriber::prelude::*;

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .init()
    }

    let result = match Command::parse() {
        Command::Artists { index, sort } => {
            list_artists(&index, |loader, tx| match sort {
                Sort::Key => loader.get_artists(tx),
                other => loader.get_artists_where(tx, Selection::all(), other.into()),
            })
            .await
        }
        Command::Genre { name, index } => {
            list_artists(&index, |loader, tx| loader.get_artists_by_genre(tx, &name)).await
        }
        Command::Search { name, index } => {
            list_artists(&index, |loader, tx| loader.search_artists_by_name(tx, &name)).await
        }
        Command::Init { index } => init_index(&index).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, cause = ?error.source(), "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn list_artists<F>(args: &IndexArgs, request: F) -> Result<(), LoaderError>
where
    F: FnOnce(&ArtistLoader, oneshot::Sender<Vec<ArtistRecord>>) -> tokio::task::JoinHandle<()>,
{
    let loader = ArtistLoader::open(&args.into()).await?;

    let (tx, rx) = oneshot::channel();
    let start = std::time::Instant::now();
    let task = request(&loader, tx);

    let records = rx.await.unwrap_or_default();
    if let Err(error) = task.await {
        error!(%error, "load task failed");
    }
    let elapsed = start.elapsed();
    info!(?elapsed, n_records = records.len(), "completed load");

    for record in &records {
        match serde_json::to_string(record) {
            Ok(line) => println!("{line}"),
            Err(error) => error!(%error, "failed to encode record"),
        }
    }

    Ok(())
}

async fn init_index(args: &IndexArgs) -> Result<(), LoaderError> {
    let loader = ArtistLoader::open(&args.into()).await?;
    loader
        .index()
        .create_schema()
        .await
        .map_err(LoaderError::Schema)?;
    debug!(url = %args.db, "initialised media index");

    Ok(())
}

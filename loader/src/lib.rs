pub mod artist;
pub mod error;
pub mod record;
pub mod sink;
pub mod task;

pub use artist::{ArtistLoadTask, ArtistLoader, ArtistQuery};
pub use error::LoaderError;
pub use media_index::{
    models::{ArtistSort, Selection},
    IndexConfig, MediaIndex,
};
pub use record::ArtistRecord;
pub use sink::{CallbackSink, ResultSink};
pub use task::LoadTask;

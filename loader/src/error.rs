use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to open media index")]
    Open(#[source] sqlx::Error),

    #[error("failed to create media index schema")]
    Schema(#[source] sqlx::Error),
}

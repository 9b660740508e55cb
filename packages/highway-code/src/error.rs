use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighwayCodeError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to read image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid section number: {0:?}")]
    InvalidSection(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HighwayCodeError>;

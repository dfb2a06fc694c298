use crate::video::extractor::ExtractError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid YouTube URL: {0:?}")]
    InvalidUrl(String),

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("io error: {0:?}")]
    IO(#[from] std::io::Error),

    #[error("unexpected error: {0:?}")]
    Other(#[from] anyhow::Error),
}

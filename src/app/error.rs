use thiserror::Error;

#[derive(Error, Debug)]
pub enum TickerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No news items available")]
    NoContent,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TickerError>;

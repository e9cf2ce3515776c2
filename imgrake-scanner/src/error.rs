use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected status {status} for {url}")]
    BadStatus { url: String, status: u16 },

    #[error("Not an image: {url} (content-type: {content_type})")]
    BadContentType { url: String, content_type: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HarvestError>;

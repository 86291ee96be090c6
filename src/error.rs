//! Errors raised at the content API boundary

use thiserror::Error;

/// Failures while fetching or shaping content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("content API returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("no {doc_type} document with uid '{uid}'")]
    NotFound { doc_type: String, uid: String },

    #[error("content API at {0} did not advertise a master ref")]
    MissingMasterRef(String),

    #[error("document {0} has no uid")]
    MissingUid(String),

    #[error("invalid publication date '{0}'")]
    InvalidDate(String),

    /// A page load was attempted while no next-page cursor was known
    #[error("no next page cursor to fetch")]
    MissingCursor,

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl ContentError {
    /// Whether the error means the requested document does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;

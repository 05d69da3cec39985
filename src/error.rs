use thiserror::Error;

/// Failures on the way to a fetched document. Extraction itself is total:
/// once HTML is in hand, missing tags degrade to absent keys, never errors.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller-supplied URL was empty, unparseable, or not http(s).
    /// Raised before any network attempt is made.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The transport failed: DNS, connection, timeout, or a non-success
    /// status when those are not ignored. Propagated unchanged, not retried.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response was not HTML and `ignore_content_type` was off.
    #[error("unsupported content type {content_type:?} from {url}")]
    UnsupportedContentType { content_type: String, url: String },

    /// The transport succeeded but the body was empty.
    #[error("empty document from {0}")]
    EmptyDocument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

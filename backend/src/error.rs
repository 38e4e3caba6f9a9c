use thiserror::Error;

/// Failure inside the record store or asset store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database failure: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("filesystem failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while querying the remote catalog. Search absorbs these: the
/// aggregator logs the error and continues with whatever local results exist.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// Error surfaced by a request handler.
///
/// `Validation` is rejected before any storage access and maps to 400;
/// `Storage` maps to 500 with the underlying message as detail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Storage(#[from] StoreError),
}

use certd_cache::CacheError;

/// Errors from starting or running the certificate server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Failed to bind the listener.
    #[error("bind {address}: {source}")]
    Bind { address: String, source: std::io::Error },

    /// The own certificate was not ready after bootstrap.
    #[error("bootstrap failed: {0}")]
    Bootstrap(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;

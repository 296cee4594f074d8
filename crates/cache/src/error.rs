use std::io;

/// Errors from building a certificate cache.
///
/// Resolving a domain never fails; these cover configuration only.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A configuration value was rejected.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The local host name could not be determined.
    #[error("host name lookup: {0}")]
    Hostname(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;

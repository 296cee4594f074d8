use std::time::Duration;

use crate::error::{CacheError, Result};

/// 30.44 days, the length `humantime` uses for `1month`.
pub const MONTH: Duration = Duration::from_secs(2_630_016);

/// Certificates are reissued once they are three months old.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3 * 2_630_016);

/// How long synthetic issuance takes.
pub const DEFAULT_ISSUE_DELAY: Duration = Duration::from_secs(10);

/// Settings for a [`Coordinator`](crate::Coordinator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Key of the service's own certificate record.
    pub self_name: String,
    /// Age at which any certificate, including `self`, is reissued.
    pub ttl: Duration,
    /// Synthetic issuance delay.
    pub issue_delay: Duration,
}

impl CacheConfig {
    /// Defaults with an explicit identity.
    pub fn new(self_name: impl Into<String>) -> Self {
        Self { self_name: self_name.into(), ttl: DEFAULT_TTL, issue_delay: DEFAULT_ISSUE_DELAY }
    }

    /// Defaults with the local host name as identity.
    pub fn for_local_host() -> Result<Self> {
        Ok(Self::new(local_hostname()?))
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_issue_delay(mut self, delay: Duration) -> Self {
        self.issue_delay = delay;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.self_name.is_empty() {
            return Err(CacheError::InvalidConfig("self name must not be empty".into()));
        }
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidConfig("ttl must be greater than 0".into()));
        }
        Ok(())
    }
}

/// The local host name, lossily converted to UTF-8.
pub fn local_hostname() -> Result<String> {
    let name = hostname::get().map_err(CacheError::Hostname)?;
    Ok(name.to_string_lossy().into_owned())
}

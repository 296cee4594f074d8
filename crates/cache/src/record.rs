use std::fmt;
use std::time::{Duration, SystemTime};

/// Issuance state of a cached record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Fetching,
    Certified,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Fetching => f.write_str("fetching"),
            Status::Certified => f.write_str("certified"),
        }
    }
}

/// An issued certificate identifier and the time it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub id: String,
    pub issued_at: SystemTime,
}

impl Certificate {
    pub fn new(id: impl Into<String>, issued_at: SystemTime) -> Self {
        Self { id: id.into(), issued_at }
    }

    /// A certificate is expired once `issued_at <= now - ttl`.
    ///
    /// When `now - ttl` underflows the epoch nothing can be old enough, so
    /// the certificate is treated as fresh.
    pub fn is_expired(&self, now: SystemTime, ttl: Duration) -> bool {
        match now.checked_sub(ttl) {
            Some(cutoff) => self.issued_at <= cutoff,
            None => false,
        }
    }

    /// The string served to callers: `"{id}-{domain}"`.
    pub fn render(&self, domain: &str) -> String {
        format!("{}-{domain}", self.id)
    }
}

/// Value stored per domain in the certificate store.
///
/// A fetching record never carries an id or issue time; a certified record
/// always carries both. There is no expired state: expiry is computed on
/// read with [`Certificate::is_expired`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateRecord {
    Fetching,
    Certified(Certificate),
}

impl CertificateRecord {
    pub fn certified(id: impl Into<String>, issued_at: SystemTime) -> Self {
        CertificateRecord::Certified(Certificate::new(id, issued_at))
    }

    pub fn status(&self) -> Status {
        match self {
            CertificateRecord::Fetching => Status::Fetching,
            CertificateRecord::Certified(_) => Status::Certified,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.certificate().map(|c| c.id.as_str())
    }

    pub fn issued_at(&self) -> Option<SystemTime> {
        self.certificate().map(|c| c.issued_at)
    }

    pub fn certificate(&self) -> Option<&Certificate> {
        match self {
            CertificateRecord::Fetching => None,
            CertificateRecord::Certified(cert) => Some(cert),
        }
    }
}

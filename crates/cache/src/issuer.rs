use std::future::Future;
use std::time::Duration;

use uuid::Uuid;

/// Produces a new certificate identifier for a domain.
///
/// Issuance cannot fail. An implementation that panics aborts only that
/// issuance; the coordinator rolls the record back and callers retry.
pub trait Issuer: Send + Sync + 'static {
    fn issue(&self, domain: &str) -> impl Future<Output = String> + Send;
}

/// Stand-in for real issuance: waits a fixed delay, then returns a random
/// UUID.
#[derive(Debug, Clone)]
pub struct SyntheticIssuer {
    delay: Duration,
}

impl SyntheticIssuer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Issuer for SyntheticIssuer {
    async fn issue(&self, domain: &str) -> String {
        tokio::time::sleep(self.delay).await;
        let id = Uuid::new_v4().to_string();
        tracing::debug!(domain, %id, "synthetic issuance complete");
        id
    }
}

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::issuer::{Issuer, SyntheticIssuer};
use crate::record::{Certificate, CertificateRecord, Status};
use crate::store::{CertStore, Entry, Flight, StoreView};

/// Outcome of one locked pass over the store.
enum Decision {
    Serve(String),
    Wait(Flight),
    Issue(Issuance),
}

/// A fetching record owned by one issuance.
///
/// Dropping it without calling [`Issuance::complete`] restores whatever the
/// record held before, which wakes every caller waiting on it.
struct Issuance {
    store: CertStore,
    domain: String,
    previous: Option<Certificate>,
    completed: bool,
}

impl Issuance {
    fn begin(store: &CertStore, view: &mut StoreView<'_>, domain: &str) -> Self {
        let previous = view.get(domain).and_then(|r| r.certificate().cloned());
        view.put(domain, CertificateRecord::Fetching);
        Self { store: store.clone(), domain: domain.to_string(), previous, completed: false }
    }

    fn domain(&self) -> &str {
        &self.domain
    }

    fn complete(mut self, cert: Certificate) -> Certificate {
        self.store.put(&self.domain, CertificateRecord::Certified(cert.clone()));
        self.completed = true;
        cert
    }
}

impl Drop for Issuance {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        tracing::warn!(domain = %self.domain, "issuance abandoned, rolling back record");
        let previous = self.previous.take();
        let domain = self.domain.as_str();
        self.store.with_lock(|view| {
            if view.status(domain) != Some(Status::Fetching) {
                return;
            }
            match previous {
                Some(cert) => view.put(domain, CertificateRecord::Certified(cert)),
                None => view.remove(domain),
            }
        });
    }
}

/// Decides, per request, whether to serve a cached certificate, join an
/// in-flight issuance, or issue a new one.
///
/// Every decision is taken under the store lock, so decisions are totally
/// ordered. Issuance runs on its own task outside the lock: callers asking
/// for the same domain join it, other domains proceed in parallel.
///
/// The service's own record (`self_name`) is privileged. Whenever it has
/// expired, the next request refreshes it and is answered with the own
/// certificate, even when a different domain was requested.
pub struct Coordinator<I = SyntheticIssuer, C = SystemClock> {
    store: CertStore,
    issuer: Arc<I>,
    clock: Arc<C>,
    config: CacheConfig,
}

impl Coordinator {
    /// Coordinator with synthetic issuance and the system clock.
    pub fn new(config: CacheConfig) -> Result<Self> {
        let issuer = SyntheticIssuer::new(config.issue_delay);
        Self::with_parts(config, issuer, SystemClock)
    }
}

impl<I: Issuer, C: Clock> Coordinator<I, C> {
    pub fn with_parts(config: CacheConfig, issuer: I, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self { store: CertStore::new(), issuer: Arc::new(issuer), clock: Arc::new(clock), config })
    }

    pub fn store(&self) -> &CertStore {
        &self.store
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn self_name(&self) -> &str {
        &self.config.self_name
    }

    /// Issue the service's own certificate. Must complete before any other
    /// request is served.
    pub async fn bootstrap(&self) -> String {
        let served = self.resolve(&self.config.self_name).await;
        tracing::info!(self_name = %self.config.self_name, "own certificate ready");
        served
    }

    /// Certificate string for `domain`, formatted `"{id}-{issued domain}"`.
    ///
    /// Never fails. It may wait for an issuance, either its own or one
    /// already in flight.
    pub async fn resolve(&self, domain: &str) -> String {
        loop {
            match self.decide(domain) {
                Decision::Serve(served) => return served,
                Decision::Wait(mut flight) => {
                    // Err only means the fetching slot is gone, which is the
                    // signal to look again.
                    let _ = flight.changed().await;
                }
                Decision::Issue(issuance) => {
                    if let Some(served) = self.issue(issuance).await {
                        return served;
                    }
                }
            }
        }
    }

    fn decide(&self, domain: &str) -> Decision {
        let now = self.clock.now();
        let ttl = self.config.ttl;
        let self_name = self.config.self_name.as_str();

        self.store.with_lock(|view| {
            let cert = match view.entry(domain) {
                None => return Decision::Issue(Issuance::begin(&self.store, view, domain)),
                Some(Entry::InFlight(flight)) => return Decision::Wait(flight),
                Some(Entry::Certified(cert)) => cert,
            };

            match view.entry(self_name) {
                Some(Entry::InFlight(flight)) => return Decision::Wait(flight),
                Some(Entry::Certified(own)) if own.is_expired(now, ttl) => {
                    if domain != self_name {
                        tracing::debug!(
                            domain,
                            self_name,
                            "own certificate expired, refreshing it instead"
                        );
                    }
                    return Decision::Issue(Issuance::begin(&self.store, view, self_name));
                }
                _ => {}
            }

            if cert.is_expired(now, ttl) {
                return Decision::Issue(Issuance::begin(&self.store, view, domain));
            }

            Decision::Serve(cert.render(domain))
        })
    }

    /// Run an issuance to completion on its own task.
    ///
    /// Returns `None` if the task died, in which case the record has been
    /// rolled back and the caller should decide again.
    async fn issue(&self, issuance: Issuance) -> Option<String> {
        let domain = issuance.domain().to_string();
        tracing::info!(domain = %domain, "issuing certificate");

        let issuer = Arc::clone(&self.issuer);
        let clock = Arc::clone(&self.clock);
        let task = tokio::spawn(async move {
            let id = issuer.issue(issuance.domain()).await;
            issuance.complete(Certificate::new(id, clock.now()))
        });

        match task.await {
            Ok(cert) => {
                tracing::info!(domain = %domain, id = %cert.id, "certificate issued");
                Some(cert.render(&domain))
            }
            Err(e) => {
                tracing::warn!(domain = %domain, "issuance task failed: {e}");
                None
            }
        }
    }
}

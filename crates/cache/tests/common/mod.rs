#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use certd_cache::{CacheConfig, Coordinator, Issuer, ManualClock, SyntheticIssuer};

pub const DELAY: Duration = Duration::from_secs(10);

/// Synthetic issuer that counts how often it is called.
#[derive(Clone)]
pub struct CountingIssuer {
    inner: SyntheticIssuer,
    calls: Arc<AtomicUsize>,
}

impl CountingIssuer {
    pub fn new(delay: Duration) -> Self {
        Self { inner: SyntheticIssuer::new(delay), calls: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Issuer for CountingIssuer {
    async fn issue(&self, domain: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.issue(domain).await
    }
}

/// Issuer whose first call panics halfway through the delay.
#[derive(Clone)]
pub struct FlakyIssuer {
    inner: CountingIssuer,
}

impl FlakyIssuer {
    pub fn new(delay: Duration) -> Self {
        Self { inner: CountingIssuer::new(delay) }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }
}

impl Issuer for FlakyIssuer {
    async fn issue(&self, domain: &str) -> String {
        if self.inner.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(self.inner.inner.delay() / 2).await;
            panic!("issuer crashed for {domain}");
        }
        self.inner.inner.issue(domain).await
    }
}

pub fn config() -> CacheConfig {
    CacheConfig::new("self").with_issue_delay(DELAY)
}

pub fn counting() -> (Arc<Coordinator<CountingIssuer, ManualClock>>, CountingIssuer, ManualClock) {
    let issuer = CountingIssuer::new(DELAY);
    let clock = ManualClock::default();
    let coord = Coordinator::with_parts(config(), issuer.clone(), clock.clone()).unwrap();
    (Arc::new(coord), issuer, clock)
}

/// Strip `-{domain}` and return the id, panicking on any other shape.
pub fn id_for<'a>(served: &'a str, domain: &str) -> &'a str {
    let id = served
        .strip_suffix(domain)
        .and_then(|rest| rest.strip_suffix('-'))
        .unwrap_or_else(|| panic!("{served:?} is not a certificate for {domain:?}"));
    assert!(!id.is_empty(), "empty id in {served:?}");
    id
}

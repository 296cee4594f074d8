use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tokio::sync::watch;

use crate::record::{Certificate, CertificateRecord, Status};

/// Subscription to an in-flight issuance.
///
/// Nothing is ever sent on the channel. `changed()` returns once the
/// fetching slot it was taken from is overwritten or removed, because that
/// drops the sender.
pub(crate) type Flight = watch::Receiver<()>;

enum Slot {
    Fetching(watch::Sender<()>),
    Certified(Certificate),
}

impl Slot {
    fn from_record(record: CertificateRecord) -> Self {
        match record {
            CertificateRecord::Fetching => Slot::Fetching(watch::channel(()).0),
            CertificateRecord::Certified(cert) => Slot::Certified(cert),
        }
    }

    fn record(&self) -> CertificateRecord {
        match self {
            Slot::Fetching(_) => CertificateRecord::Fetching,
            Slot::Certified(cert) => CertificateRecord::Certified(cert.clone()),
        }
    }
}

/// What a locked lookup found for a domain.
pub(crate) enum Entry {
    InFlight(Flight),
    Certified(Certificate),
}

/// In-memory certificate records keyed by domain.
///
/// A single lock guards every domain. It is only held for the duration of a
/// lookup-and-decide step and never across an `.await`; issuance itself
/// runs outside it. Clones share the same records.
#[derive(Clone, Default)]
pub struct CertStore {
    slots: Arc<Mutex<HashMap<String, Slot>>>,
}

impl std::fmt::Debug for CertStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertStore").field("records", &self.len()).finish()
    }
}

impl CertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to every record.
    ///
    /// The lock is released when `f` returns or unwinds.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut StoreView<'_>) -> R) -> R {
        let mut view = StoreView { slots: self.slots.lock() };
        f(&mut view)
    }

    pub fn get(&self, domain: &str) -> Option<CertificateRecord> {
        self.with_lock(|view| view.get(domain))
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.with_lock(|view| view.contains(domain))
    }

    /// Insert or overwrite the record for a domain.
    pub fn put(&self, domain: &str, record: CertificateRecord) {
        self.with_lock(|view| view.put(domain, record));
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every record, sorted by domain.
    pub fn snapshot(&self) -> Vec<(String, CertificateRecord)> {
        let slots = self.slots.lock();
        let mut records: Vec<_> =
            slots.iter().map(|(domain, slot)| (domain.clone(), slot.record())).collect();
        records.sort_by(|a, b| a.0.cmp(&b.0));
        records
    }
}

/// Exclusive view of the store, handed out by [`CertStore::with_lock`].
pub struct StoreView<'a> {
    slots: MutexGuard<'a, HashMap<String, Slot>>,
}

impl StoreView<'_> {
    pub fn get(&self, domain: &str) -> Option<CertificateRecord> {
        self.slots.get(domain).map(Slot::record)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.slots.contains_key(domain)
    }

    /// Insert or overwrite. Replacing a fetching record wakes its waiters.
    pub fn put(&mut self, domain: &str, record: CertificateRecord) {
        self.slots.insert(domain.to_string(), Slot::from_record(record));
    }

    pub(crate) fn entry(&self, domain: &str) -> Option<Entry> {
        self.slots.get(domain).map(|slot| match slot {
            Slot::Fetching(done) => Entry::InFlight(done.subscribe()),
            Slot::Certified(cert) => Entry::Certified(cert.clone()),
        })
    }

    pub(crate) fn status(&self, domain: &str) -> Option<Status> {
        self.slots.get(domain).map(|slot| match slot {
            Slot::Fetching(_) => Status::Fetching,
            Slot::Certified(_) => Status::Certified,
        })
    }

    pub(crate) fn remove(&mut self, domain: &str) {
        self.slots.remove(domain);
    }
}

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod clock;
pub mod config;
mod coordinator;
mod error;
pub mod issuer;
pub mod record;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, DEFAULT_ISSUE_DELAY, DEFAULT_TTL, MONTH};
pub use coordinator::Coordinator;
pub use error::{CacheError, Result};
pub use issuer::{Issuer, SyntheticIssuer};
pub use record::{Certificate, CertificateRecord, Status};
pub use store::{CertStore, StoreView};

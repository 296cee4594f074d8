use axum::Json;
use axum::extract::{Path, State};
use certd_cache::Status;
use serde::{Deserialize, Serialize};

use super::AppState;

pub const INSTRUCTIONS: &str = "Hi there! This service is used to get mock certificates for domains that you provide.

In order to use this service, you'll need to use the \"/cert/{domain}\" endpoint.

For example, \"/cert/https://thisisanexample.com\" is how you would use this service to get the certificate for thisisanexample.com
";

pub const MISSING_DOMAIN: &str = "Sorry, would you please include a domain in your request?";

/// Body of `GET /v1/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub self_name: String,
    pub ttl_secs: u64,
    pub issue_delay_ms: u64,
    pub records: usize,
    pub fetching: usize,
    pub domains: Vec<RecordStatus>,
}

/// One cached record as listed by `GET /v1/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStatus {
    pub domain: String,
    pub status: String,
    pub id: Option<String>,
}

pub async fn get_root() -> &'static str {
    INSTRUCTIONS
}

pub async fn get_healthz() -> &'static str {
    "ok\n"
}

pub async fn get_cert_without_domain() -> &'static str {
    MISSING_DOMAIN
}

/// The response body is the certificate string, verbatim. It may name the
/// service's own identity rather than `domain` when the own certificate
/// was due for renewal.
pub async fn get_cert(State(state): State<AppState>, Path(domain): Path<String>) -> String {
    tracing::info!(domain = %domain, "starting request");
    let served = state.coordinator.resolve(&domain).await;
    tracing::info!(domain = %domain, "request finished");
    served
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let config = state.coordinator.config();
    let snapshot = state.coordinator.store().snapshot();
    let fetching = snapshot.iter().filter(|(_, r)| r.status() == Status::Fetching).count();
    let domains: Vec<RecordStatus> = snapshot
        .into_iter()
        .map(|(domain, record)| RecordStatus {
            status: record.status().to_string(),
            id: record.id().map(str::to_string),
            domain,
        })
        .collect();

    Json(StatusResponse {
        self_name: config.self_name.clone(),
        ttl_secs: config.ttl.as_secs(),
        issue_delay_ms: u64::try_from(config.issue_delay.as_millis()).unwrap_or(u64::MAX),
        records: domains.len(),
        fetching,
        domains,
    })
}

use std::net::SocketAddr;
use std::time::Duration;

use certd_cache::{CacheConfig, config::local_hostname};
use clap::Parser;

use crate::error::CliError;

/// certd: mock certificate issuing service.
#[derive(Debug, Parser)]
#[command(name = "certd", version, about)]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080", env = "CERTD_LISTEN")]
    pub listen: SocketAddr,

    /// Name of this service's own certificate (defaults to the host name).
    #[arg(long, env = "CERTD_SELF_NAME")]
    pub self_name: Option<String>,

    /// Age at which certificates are reissued, e.g. "3months" or "90days".
    #[arg(long, default_value = "3months", env = "CERTD_TTL", value_parser = humantime::parse_duration)]
    pub ttl: Duration,

    /// How long synthetic issuance takes.
    #[arg(long, default_value = "10s", env = "CERTD_ISSUE_DELAY", value_parser = humantime::parse_duration)]
    pub issue_delay: Duration,

    /// Log filter used when RUST_LOG is unset (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "CERTD_LOG_LEVEL")]
    pub log_level: String,
}

impl Cli {
    /// Validated cache settings.
    pub fn cache_config(&self) -> Result<CacheConfig, CliError> {
        let self_name = match &self.self_name {
            Some(name) => name.clone(),
            None => local_hostname()?,
        };
        let config =
            CacheConfig::new(self_name).with_ttl(self.ttl).with_issue_delay(self.issue_delay);
        config.validate()?;
        Ok(config)
    }
}

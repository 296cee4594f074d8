#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod args;
mod error;

use certd_server::{CertServer, ServerConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::args::Cli;
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_tracing(&cli.log_level);

    let config = ServerConfig { listen: cli.listen, cache: cli.cache_config()? };

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    rt.block_on(async {
        let server = CertServer::start(config).await?;
        wait_for_signal().await;
        tracing::info!("shutting down");
        server.stop().await?;
        Ok::<(), CliError>(())
    })
}

/// `RUST_LOG` wins over `--log-level`; an unparsable level falls back to info.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let ctrl_c = tokio::signal::ctrl_c();
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            tokio::select! {
                _ = ctrl_c => {},
                _ = sigterm.recv() => {},
            }
        } else {
            let _ = ctrl_c.await;
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

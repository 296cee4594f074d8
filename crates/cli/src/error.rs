use certd_cache::CacheError;
use certd_server::ServerError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Invalid settings.
    #[error("{0}")]
    Config(#[from] CacheError),

    /// The server failed to start or crashed.
    #[error("{0}")]
    Server(#[from] ServerError),

    /// The async runtime could not be built.
    #[error("failed to start runtime: {0}")]
    Runtime(std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::Server(ServerError::Cache(_)) => 64, // EX_USAGE
            CliError::Server(_) | CliError::Runtime(_) => 1,
        }
    }
}

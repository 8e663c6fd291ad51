use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

/// Runtime configuration assembled once at startup and passed down
/// explicitly; there is no global configuration state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the generation service, e.g. `http://localhost:8000/api/v1`.
    pub api_base_url: String,
    /// Directory holding persisted conversations.
    pub data_dir: PathBuf,
    /// Per-request timeout for generation calls.
    pub request_timeout: Duration,
    /// Print request details while chatting.
    pub verbose: bool,
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_base_url: cli.api_url.clone(),
            data_dir: cli.data_dir.clone(),
            request_timeout: Duration::from_secs(cli.timeout_secs),
            verbose: cli.verbose,
        }
    }
}

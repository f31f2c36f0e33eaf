//! Startup configuration, resolved once from the process environment.

use std::fmt;
use std::time::Duration;

use crate::error::BridgeError;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable bridge configuration.
///
/// Constructed once at process start and passed explicitly into
/// [`TaskApiClient::new`](crate::backend::TaskApiClient::new); tool handlers
/// never touch ambient credential state.
#[derive(Clone)]
pub struct BridgeConfig {
    /// Base URL of the Task API.
    pub api_url: String,
    /// Shared secret attached to every backend request.
    pub api_key: String,
    /// Connect/read timeout for backend calls. Always finite and non-zero.
    pub timeout: Duration,
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl BridgeConfig {
    /// Load from environment variables (`TASK_API_URL`, `TASK_API_KEY`,
    /// `TASK_API_TIMEOUT_SECS`), honoring a `.env` file when present.
    ///
    /// A missing `TASK_API_KEY` is a hard error: the process must not start
    /// without its credential. A zero or unparsable timeout is likewise
    /// rejected rather than silently becoming "wait forever".
    pub fn from_env() -> Result<Self, BridgeError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let api_url = std::env::var("TASK_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_key = std::env::var("TASK_API_KEY")
            .map_err(|_| BridgeError::Configuration("TASK_API_KEY is not set".to_string()))?;
        if api_key.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "TASK_API_KEY is empty".to_string(),
            ));
        }

        let timeout_secs = match std::env::var("TASK_API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                BridgeError::Configuration(format!("TASK_API_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(BridgeError::Configuration(
                "TASK_API_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a config directly, normalizing the base URL. Used by tests and
    /// embedders that resolve settings some other way.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

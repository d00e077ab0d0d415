//! Configuration models loaded from `shield-vote.toml`.

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use super::AppError;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "shield-vote.toml";

pub const ENV_RPC_URL: &str = "SHIELD_VOTE_RPC_URL";
pub const ENV_CONTRACT_ADDRESS: &str = "SHIELD_VOTE_CONTRACT_ADDRESS";
pub const ENV_CHAIN_ID: &str = "SHIELD_VOTE_CHAIN_ID";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub proposals: ProposalsConfig,
}

/// Which ledger client persists votes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// Append-only JSON-lines journal on local disk.
    #[default]
    Journal,
    /// Remote ledger gateway over HTTP.
    Http,
}

/// Ledger client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    #[serde(default)]
    pub backend: LedgerBackend,
    /// Journal file used by the `journal` backend.
    #[serde(default = "default_journal_path")]
    pub journal_path: PathBuf,
    #[serde(default)]
    pub http: HttpLedgerConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::default(),
            journal_path: default_journal_path(),
            http: HttpLedgerConfig::default(),
        }
    }
}

/// Ledger gateway settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpLedgerConfig {
    /// Gateway base URL.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: Url,
    /// Voting contract the gateway submits to.
    #[serde(default)]
    pub contract_address: String,
    /// Target chain (Sepolia by default).
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per request, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between attempts in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for HttpLedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: String::new(),
            chain_id: default_chain_id(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Where proposals come from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProposalsConfig {
    /// TOML seed file; the embedded seed is used when unset.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

fn default_journal_path() -> PathBuf {
    PathBuf::from(".shield-vote/votes.jsonl")
}

fn default_rpc_url() -> Url {
    Url::parse("http://127.0.0.1:8787/").expect("default ledger URL must be valid")
}

fn default_chain_id() -> u64 {
    11_155_111
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl AppConfig {
    /// Parse configuration from TOML content and validate it.
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let http = &self.ledger.http;
        if !matches!(http.rpc_url.scheme(), "http" | "https") {
            return Err(AppError::config_error(format!(
                "ledger.http.rpc_url must use http or https, got '{}'",
                http.rpc_url.scheme()
            )));
        }
        if http.timeout_secs == 0 {
            return Err(AppError::config_error("ledger.http.timeout_secs must be at least 1"));
        }
        if self.ledger.backend == LedgerBackend::Http && http.contract_address.trim().is_empty() {
            return Err(AppError::config_error(
                "ledger.http.contract_address is required when backend = \"http\"",
            ));
        }
        if self.ledger.journal_path.as_os_str().is_empty() {
            return Err(AppError::config_error("ledger.journal_path must not be empty"));
        }
        Ok(())
    }

    /// Apply `SHIELD_VOTE_*` overrides using the given variable lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http = &mut self.ledger.http;

        if let Some(raw) = lookup(ENV_RPC_URL).filter(|v| !v.trim().is_empty()) {
            http.rpc_url = Url::parse(raw.trim()).map_err(|e| {
                AppError::InvalidEnvironmentVariable {
                    name: ENV_RPC_URL.to_string(),
                    details: e.to_string(),
                }
            })?;
        }
        if let Some(raw) = lookup(ENV_CONTRACT_ADDRESS).filter(|v| !v.trim().is_empty()) {
            http.contract_address = raw.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_CHAIN_ID).filter(|v| !v.trim().is_empty()) {
            http.chain_id = raw.trim().parse::<u64>().map_err(|e| {
                AppError::InvalidEnvironmentVariable {
                    name: ENV_CHAIN_ID.to_string(),
                    details: e.to_string(),
                }
            })?;
        }

        Ok(())
    }
}

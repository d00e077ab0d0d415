//! Ledger gateway client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderValue, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, HttpLedgerConfig, LedgerReceipt, ProposalId, Tally, VoteRecord};
use crate::ports::LedgerClient;

const DEFAULT_STATUS_MESSAGE: &str = "Ledger request failed";

/// HTTP transport for the ledger gateway.
///
/// This client performs a single request per call. Retry behavior is implemented
/// by a dedicated retry wrapper adapter.
#[derive(Debug, Clone)]
pub struct HttpLedgerClient {
    base_url: Url,
    contract_address: String,
    chain_id: u64,
    client: Client,
}

impl HttpLedgerClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: &HttpLedgerConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::LedgerApiError {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(Self {
            base_url: with_trailing_slash(config.rpc_url.clone()),
            contract_address: config.contract_address.clone(),
            chain_id: config.chain_id,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url.join(path).map_err(|e| AppError::LedgerApiError {
            message: format!("Invalid ledger endpoint '{}': {}", path, e),
            status: None,
        })
    }

    fn read_body<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, AppError> {
        let status = response.status();
        let retry_after_ms = response.headers().get(RETRY_AFTER).and_then(parse_retry_after_ms);
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body_text).map_err(|e| AppError::LedgerApiError {
                message: format!("Failed to parse response: {}", e),
                status: Some(status.as_u16()),
            });
        }

        let mut message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        if let Some(value) = retry_after_ms {
            message.push_str(&format!(" (retry_after_ms={})", value));
        }

        Err(AppError::LedgerApiError { message, status: Some(status.as_u16()) })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordVoteRequest<'a> {
    proposal_id: &'a str,
    voter_id: &'a str,
    choice: u8,
    contract_address: &'a str,
    chain_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordVoteResponse {
    #[serde(default)]
    tx_hash: Option<String>,
    #[serde(default)]
    hash: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TalliesResponse {
    votes_for: u64,
    votes_against: u64,
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

fn parse_retry_after_ms(value: &HeaderValue) -> Option<u64> {
    let raw = value.to_str().ok()?.trim();
    let seconds = raw.parse::<u64>().ok()?;
    Some(seconds.saturating_mul(1000))
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::LedgerApiError { message: format!("HTTP request failed: {}", e), status: None }
}

impl LedgerClient for HttpLedgerClient {
    fn record_vote(&self, record: &VoteRecord) -> Result<LedgerReceipt, AppError> {
        let request = RecordVoteRequest {
            proposal_id: record.proposal_id.as_str(),
            voter_id: record.voter_id.as_str(),
            choice: record.choice.as_ledger_value(),
            contract_address: &self.contract_address,
            chain_id: self.chain_id,
        };

        let response = self
            .client
            .post(self.endpoint("votes")?)
            .json(&request)
            .send()
            .map_err(transport_error)?;

        let body: RecordVoteResponse = Self::read_body(response)?;
        let reference = body.tx_hash.or(body.hash).ok_or_else(|| AppError::LedgerApiError {
            message: "No transaction hash in response".into(),
            status: None,
        })?;
        Ok(LedgerReceipt::new(reference))
    }

    fn read_tallies(&self, proposal_id: &ProposalId) -> Result<Tally, AppError> {
        let path = format!("proposals/{}/tallies", proposal_id);
        let response =
            self.client.get(self.endpoint(&path)?).send().map_err(transport_error)?;

        let body: TalliesResponse = Self::read_body(response)?;
        Ok(Tally::new(body.votes_for, body.votes_against))
    }
}

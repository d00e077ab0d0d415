//! Retry wrapper for ledger client operations.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::domain::{AppError, HttpLedgerConfig, LedgerReceipt, ProposalId, Tally, VoteRecord};
use crate::ports::LedgerClient;

const DEFAULT_MAX_DELAY_MS: u64 = 30_000;
const RETRY_AFTER_TOKEN: &str = "retry_after_ms=";
const MAX_LOG_ERROR_CHARS: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &HttpLedgerConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn delay_for_retry(&self, failed_attempt: u32, error: &AppError) -> Duration {
        if let Some(retry_after_ms) = extract_retry_after_ms(error) {
            return Duration::from_millis(retry_after_ms.min(self.max_delay_ms));
        }

        // attempt=1 -> base, attempt=2 -> base*2, attempt=3 -> base*4, capped.
        let exponent = failed_attempt.saturating_sub(1).min(6);
        let backoff_ms = self.base_delay_ms.saturating_mul(1_u64 << exponent).min(self.max_delay_ms);
        let jitter_ms = compute_jitter_ms(backoff_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(self.max_delay_ms))
    }
}

pub struct RetryingLedgerClient {
    inner: Box<dyn LedgerClient>,
    policy: RetryPolicy,
}

impl RetryingLedgerClient {
    pub fn new(inner: Box<dyn LedgerClient>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    fn with_retries<T>(
        &self,
        operation: &str,
        retryable: fn(&AppError) -> bool,
        mut call: impl FnMut() -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut attempt = 1;
        loop {
            let error = match call() {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !retryable(&error) || attempt >= self.policy.max_attempts {
                return Err(error);
            }

            let delay = self.policy.delay_for_retry(attempt, &error);
            eprintln!(
                "⚠️  Ledger {} failed (attempt {}/{}): {}. Retrying in {} ms.",
                operation,
                attempt,
                self.policy.max_attempts,
                format_error_for_log(&error),
                delay.as_millis()
            );
            thread::sleep(delay);
            attempt += 1;
        }
    }
}

impl LedgerClient for RetryingLedgerClient {
    fn record_vote(&self, record: &VoteRecord) -> Result<LedgerReceipt, AppError> {
        self.with_retries("record_vote", is_unprocessed_rejection, || {
            self.inner.record_vote(record)
        })
    }

    fn read_tallies(&self, proposal_id: &ProposalId) -> Result<Tally, AppError> {
        self.with_retries("read_tallies", is_retryable_error, || {
            self.inner.read_tallies(proposal_id)
        })
    }
}

fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::LedgerApiError { status: Some(code), .. } => {
            *code == 429 || *code == 408 || *code >= 500
        }
        AppError::LedgerApiError { status: None, message } => {
            let lower = message.to_ascii_lowercase();
            lower.contains("timeout")
                || lower.contains("timed out")
                || lower.contains("connect")
                || lower.contains("http request failed")
        }
        _ => false,
    }
}

/// Votes are not idempotent: after a 5xx or a dropped connection the gateway
/// may already hold the vote, so only rejections that guarantee it was not
/// processed are replayed.
fn is_unprocessed_rejection(error: &AppError) -> bool {
    matches!(error, AppError::LedgerApiError { status: Some(408 | 429), .. })
}

fn extract_retry_after_ms(error: &AppError) -> Option<u64> {
    let AppError::LedgerApiError { message, .. } = error else {
        return None;
    };

    let start = message.find(RETRY_AFTER_TOKEN)? + RETRY_AFTER_TOKEN.len();
    let digits: String =
        message[start..].chars().take_while(|ch| ch.is_ascii_digit()).collect();
    digits.parse::<u64>().ok()
}

fn compute_jitter_ms(backoff_ms: u64) -> u64 {
    let jitter_cap = backoff_ms / 4; // 25% jitter upper bound
    if jitter_cap == 0 {
        return 0;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.subsec_nanos() as u64)
        .unwrap_or(0);

    nanos % jitter_cap
}

fn format_error_for_log(error: &AppError) -> String {
    match error {
        AppError::LedgerApiError { message, status } => {
            let sanitized = sanitize_and_truncate_for_log(message);
            match status {
                Some(code) => format!("LedgerApiError(status={}): {}", code, sanitized),
                None => format!("LedgerApiError: {}", sanitized),
            }
        }
        _ => sanitize_and_truncate_for_log(&error.to_string()),
    }
}

fn sanitize_and_truncate_for_log(input: &str) -> String {
    let truncated: String = input
        .chars()
        .take(MAX_LOG_ERROR_CHARS)
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();

    let mut compact = truncated.split_whitespace().collect::<Vec<_>>().join(" ");
    if input.chars().count() > MAX_LOG_ERROR_CHARS {
        compact.push_str(" [truncated]");
    }
    compact
}

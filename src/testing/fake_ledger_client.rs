use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::domain::{AppError, LedgerReceipt, ProposalId, Tally, VoteRecord};
use crate::ports::LedgerClient;

/// In-memory ledger client that records every accepted vote.
///
/// Clones share state, so a test can keep one handle while the ledger owns
/// another.
#[derive(Clone, Default)]
pub struct FakeLedgerClient {
    recorded: Arc<Mutex<Vec<VoteRecord>>>,
    attempts: Arc<Mutex<usize>>,
    failures: Arc<Mutex<VecDeque<AppError>>>,
    tallies: Arc<Mutex<HashMap<ProposalId, Tally>>>,
    delay: Duration,
}

impl FakeLedgerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside `record_vote` to widen race windows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make the next `record_vote` call fail with `error`.
    pub fn fail_next(&self, error: AppError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn set_tallies(&self, proposal_id: &ProposalId, tally: Tally) {
        self.tallies.lock().unwrap().insert(proposal_id.clone(), tally);
    }

    pub fn recorded(&self) -> Vec<VoteRecord> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    pub fn boxed(&self) -> Box<dyn LedgerClient> {
        Box::new(self.clone())
    }
}

impl LedgerClient for FakeLedgerClient {
    fn record_vote(&self, record: &VoteRecord) -> Result<LedgerReceipt, AppError> {
        *self.attempts.lock().unwrap() += 1;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        let mut recorded = self.recorded.lock().unwrap();
        recorded.push(record.clone());
        Ok(LedgerReceipt::new(format!("fake-receipt-{}", recorded.len())))
    }

    fn read_tallies(&self, proposal_id: &ProposalId) -> Result<Tally, AppError> {
        self.tallies.lock().unwrap().get(proposal_id).copied().ok_or_else(|| {
            AppError::LedgerApiError {
                message: format!("unknown proposal {}", proposal_id),
                status: Some(404),
            }
        })
    }
}

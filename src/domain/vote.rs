//! Vote choices and durable vote records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AppError;
use super::identifiers::{ProposalId, VoterId};

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    For,
    Against,
}

impl VoteChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::For => "for",
            VoteChoice::Against => "against",
        }
    }

    /// Wording used in confirmations: "support" or "opposition".
    pub fn stance(&self) -> &'static str {
        match self {
            VoteChoice::For => "support",
            VoteChoice::Against => "opposition",
        }
    }

    /// Numeric encoding used by the ledger gateway (1 = for, 0 = against).
    pub fn as_ledger_value(&self) -> u8 {
        match self {
            VoteChoice::For => 1,
            VoteChoice::Against => 0,
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteChoice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "for" | "yes" => Ok(VoteChoice::For),
            "against" | "no" => Ok(VoteChoice::Against),
            _ => Err(AppError::InvalidVoteChoice(s.to_string())),
        }
    }
}

/// Reference returned by the ledger client once a vote is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReceipt {
    pub reference: String,
}

impl LedgerReceipt {
    pub fn new(reference: impl Into<String>) -> Self {
        Self { reference: reference.into() }
    }
}

/// The fact that a voter cast a choice on a proposal.
///
/// Keyed by `(proposal_id, voter_id)`. A record is never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub proposal_id: ProposalId,
    pub voter_id: VoterId,
    pub choice: VoteChoice,
    pub recorded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<LedgerReceipt>,
}

impl VoteRecord {
    pub fn new(proposal_id: ProposalId, voter_id: VoterId, choice: VoteChoice) -> Self {
        Self { proposal_id, voter_id, choice, recorded_at: Utc::now(), receipt: None }
    }

    pub fn with_receipt(mut self, receipt: LedgerReceipt) -> Self {
        self.receipt = Some(receipt);
        self
    }

    pub fn key(&self) -> (ProposalId, VoterId) {
        (self.proposal_id.clone(), self.voter_id.clone())
    }
}

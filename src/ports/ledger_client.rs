//! Ledger client port definition.

use crate::domain::{AppError, LedgerReceipt, ProposalId, Tally, VoteRecord};

/// Port for the external system of record that durably persists votes.
///
/// Implementations own transport, signing and retry concerns. A returned
/// error means the vote was not persisted.
pub trait LedgerClient: Send + Sync {
    /// Persist one vote and return the ledger's reference for it.
    fn record_vote(&self, record: &VoteRecord) -> Result<LedgerReceipt, AppError>;

    /// Read the ledger's current counters for a proposal.
    fn read_tallies(&self, proposal_id: &ProposalId) -> Result<Tally, AppError>;
}

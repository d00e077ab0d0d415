use serde::Serialize;

use super::identifiers::{ProposalId, VoterId};
use super::proposal::Tally;
use super::vote::VoteChoice;

/// Emitted after a vote is committed to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecorded {
    pub proposal_id: ProposalId,
    pub voter_id: VoterId,
    pub choice: VoteChoice,
    /// Tallies after this vote was counted.
    pub tally: Tally,
}

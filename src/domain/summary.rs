use serde::Serialize;

use super::proposal::{Proposal, ProposalStatus};

/// Aggregated treasury statistics over a set of proposals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasurySummary {
    pub total_proposals: usize,
    pub active: usize,
    pub passed: usize,
    pub rejected: usize,
    pub encrypted: usize,
    /// Sum of requested amounts across active proposals.
    pub requested_active: u64,
    /// Visible votes across all non-encrypted proposals.
    pub votes_cast: u64,
    /// Vote records held by the ledger in this session.
    pub recorded_votes: usize,
}

impl TreasurySummary {
    pub fn from_proposals<'a, I>(proposals: I, recorded_votes: usize) -> Self
    where
        I: IntoIterator<Item = &'a Proposal>,
    {
        let mut summary = TreasurySummary { recorded_votes, ..Default::default() };
        for proposal in proposals {
            summary.total_proposals += 1;
            match proposal.status() {
                ProposalStatus::Active => {
                    summary.active += 1;
                    summary.requested_active =
                        summary.requested_active.saturating_add(proposal.requested_amount());
                }
                ProposalStatus::Passed => summary.passed += 1,
                ProposalStatus::Rejected => summary.rejected += 1,
                ProposalStatus::Encrypted => summary.encrypted += 1,
            }
            if let Some(tally) = proposal.visible_tally() {
                summary.votes_cast = summary.votes_cast.saturating_add(tally.total());
            }
        }
        summary
    }
}

//! Two-step vote casting: select a choice, then confirm it explicitly.
//!
//! A [`VoteIntent`] is the selection step and carries no ledger state;
//! dropping it abandons the vote. [`cast_vote`] is the only way an intent
//! reaches [`VotingLedger::submit_vote`], and it always asks a
//! [`VoteConfirmer`] first.

use crate::app::ledger::VotingLedger;
use crate::domain::{AppError, Proposal, ProposalId, VoteChoice, VoteError, VoterId};
use crate::ports::{ConfirmationRequest, VoteConfirmer};

/// A selected but unconfirmed vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteIntent {
    proposal_id: ProposalId,
    voter_id: VoterId,
    choice: VoteChoice,
}

impl VoteIntent {
    pub fn new(proposal_id: ProposalId, voter_id: VoterId, choice: VoteChoice) -> Self {
        Self { proposal_id, voter_id, choice }
    }

    pub fn proposal_id(&self) -> &ProposalId {
        &self.proposal_id
    }

    pub fn voter_id(&self) -> &VoterId {
        &self.voter_id
    }

    pub fn choice(&self) -> VoteChoice {
        self.choice
    }

    /// Build the text shown to the user for this intent.
    pub fn confirmation_request(&self, proposal: &Proposal) -> ConfirmationRequest {
        ConfirmationRequest {
            proposal_id: self.proposal_id.clone(),
            voter_id: self.voter_id.clone(),
            title: proposal.title().to_string(),
            amount: proposal.formatted_amount(),
            choice: self.choice,
        }
    }
}

/// Result of a confirmation-gated vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The user confirmed and the ledger recorded the vote.
    Recorded(Proposal),
    /// The user declined; nothing was submitted.
    Abandoned,
}

/// Confirm `intent` through `confirmer` and submit it.
///
/// Rejections that are already certain (`ProposalNotFound`,
/// `ProposalNotActive`, `AlreadyVoted`) are reported before the user is
/// asked. The ledger re-checks everything on submission.
pub fn cast_vote(
    ledger: &VotingLedger,
    intent: VoteIntent,
    confirmer: &dyn VoteConfirmer,
) -> Result<VoteOutcome, AppError> {
    let proposal = ledger.get_proposal(&intent.proposal_id)?;
    if !proposal.is_active() {
        return Err(VoteError::ProposalNotActive {
            proposal: intent.proposal_id,
            status: proposal.status(),
        }
        .into());
    }
    if ledger.has_voted(&intent.proposal_id, &intent.voter_id) {
        return Err(VoteError::AlreadyVoted {
            proposal: intent.proposal_id,
            voter: intent.voter_id,
        }
        .into());
    }

    let request = intent.confirmation_request(&proposal);
    if !confirmer.confirm(&request)? {
        return Ok(VoteOutcome::Abandoned);
    }

    let updated = ledger.submit_vote(&intent.proposal_id, &intent.voter_id, intent.choice)?;
    Ok(VoteOutcome::Recorded(updated))
}

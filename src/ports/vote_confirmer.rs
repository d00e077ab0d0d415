//! Explicit confirmation port for irreversible votes.

use crate::domain::{AppError, ProposalId, VoteChoice, VoterId};

/// Everything the user sees before confirming a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub proposal_id: ProposalId,
    pub voter_id: VoterId,
    pub title: String,
    /// Requested amount, already formatted for display.
    pub amount: String,
    pub choice: VoteChoice,
}

impl ConfirmationRequest {
    /// Short question suitable for a yes/no prompt.
    pub fn prompt(&self) -> String {
        format!(
            "Vote {} proposal {} as {}?",
            self.choice.as_str().to_uppercase(),
            self.proposal_id,
            self.voter_id.abbreviated()
        )
    }

    /// Full confirmation text, including the irreversibility warning.
    pub fn message(&self) -> String {
        format!(
            "You are about to vote {} proposal {}: \"{}\".\n\nAmount: {}\n\nThis action cannot be undone.",
            self.choice.as_str().to_uppercase(),
            self.proposal_id,
            self.title,
            self.amount
        )
    }
}

/// Port for the explicit confirmation step that gates every vote.
pub trait VoteConfirmer {
    /// Return `Ok(true)` only when the user explicitly confirmed.
    fn confirm(&self, request: &ConfirmationRequest) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ConfirmationRequest {
        ConfirmationRequest {
            proposal_id: ProposalId::new("PROP-001").unwrap(),
            voter_id: VoterId::new("0x71C7656EC7ab88b098defB751B7401B5f6d8976F").unwrap(),
            title: "Marketing Budget Allocation Q4".to_string(),
            amount: "$150,000".to_string(),
            choice: VoteChoice::Against,
        }
    }

    #[test]
    fn message_names_choice_title_and_amount() {
        let message = request().message();
        assert!(message.contains("vote AGAINST proposal PROP-001"));
        assert!(message.contains("\"Marketing Budget Allocation Q4\""));
        assert!(message.contains("Amount: $150,000"));
        assert!(message.contains("cannot be undone"));
    }

    #[test]
    fn prompt_uses_abbreviated_voter() {
        assert_eq!(request().prompt(), "Vote AGAINST proposal PROP-001 as 0x71C7...976F?");
    }
}

//! Confirmers used by the `vote` command.

use dialoguer::Confirm;

use crate::domain::{AppError, ProposalId};
use crate::ports::{ConfirmationRequest, VoteConfirmer};

/// Interactive yes/no prompt. Defaults to "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerConfirmer;

impl VoteConfirmer for DialoguerConfirmer {
    fn confirm(&self, request: &ConfirmationRequest) -> Result<bool, AppError> {
        println!("{}\n", request.message());
        Confirm::new()
            .with_prompt(request.prompt())
            .default(false)
            .interact()
            .map_err(|err| AppError::Prompt(format!("Failed to read confirmation: {}", err)))
    }
}

/// Non-interactive confirmation: the caller must repeat the proposal id.
#[derive(Debug, Clone)]
pub struct TypedConfirmation {
    expected: String,
}

impl TypedConfirmation {
    pub fn new(expected: impl Into<String>) -> Self {
        Self { expected: expected.into() }
    }
}

impl VoteConfirmer for TypedConfirmation {
    fn confirm(&self, request: &ConfirmationRequest) -> Result<bool, AppError> {
        let typed = ProposalId::new(self.expected.trim()).map_err(|_| {
            AppError::Prompt(format!(
                "--confirm expects the proposal id, got '{}'",
                self.expected
            ))
        })?;
        if typed != request.proposal_id {
            return Err(AppError::Prompt(format!(
                "--confirm {} does not match proposal {}",
                typed, request.proposal_id
            )));
        }
        println!("{}\n", request.message());
        Ok(true)
    }
}

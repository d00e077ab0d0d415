use std::io;

use thiserror::Error;

use super::identifiers::{ProposalId, VoterId};
use super::proposal::ProposalStatus;

/// Rejections produced by a vote submission.
///
/// Every variant is recoverable: the caller reports it and the ledger stays
/// as it was before the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteError {
    /// A vote from this voter is already recorded on the proposal.
    #[error("Voter '{voter}' has already cast a vote on proposal {proposal}")]
    AlreadyVoted { proposal: ProposalId, voter: VoterId },

    /// Proposal is encrypted, passed or rejected.
    #[error("Proposal {proposal} is not open for voting (status: {status})")]
    ProposalNotActive { proposal: ProposalId, status: ProposalStatus },

    /// Unknown proposal identifier.
    #[error("Proposal {0} not found")]
    ProposalNotFound(ProposalId),

    /// The ledger client failed; the vote was not confirmed.
    #[error("Vote not confirmed, ledger unavailable: {0}")]
    LedgerUnavailable(String),
}

/// Library-wide error type for shield-vote operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Vote submission was rejected.
    #[error(transparent)]
    Vote(#[from] VoteError),

    /// Ledger gateway request failed.
    #[error("Ledger API error{}: {message}", format_status(.status))]
    LedgerApiError { message: String, status: Option<u16> },

    /// Proposal identifier is invalid.
    #[error("Invalid proposal identifier '{0}': must be alphanumeric with hyphens or underscores")]
    InvalidProposalId(String),

    /// Voter identifier is invalid.
    #[error(
        "Invalid voter identifier '{0}': must be alphanumeric with hyphens, underscores, or periods"
    )]
    InvalidVoterId(String),

    /// A proposal with the same id is already registered.
    #[error("Proposal {0} already exists")]
    DuplicateProposal(ProposalId),

    /// Status change not permitted by the proposal lifecycle.
    #[error("Proposal {proposal} cannot move from {from} to {to}")]
    InvalidStatusTransition { proposal: ProposalId, from: ProposalStatus, to: ProposalStatus },

    /// Vote choice string is not recognised.
    #[error("Invalid vote choice '{0}': must be 'for' or 'against'")]
    InvalidVoteChoice(String),

    /// Status string is not recognised.
    #[error("Invalid status '{0}': must be one of active, passed, rejected, encrypted")]
    InvalidStatus(String),

    /// Environment variable holds an unusable value.
    #[error("Environment variable {name} is invalid: {details}")]
    InvalidEnvironmentVariable { name: String, details: String },

    /// Interactive prompt failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

fn format_status(status: &Option<u16>) -> String {
    status.map(|code| format!(" (status {})", code)).unwrap_or_default()
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// The vote rejection carried by this error, if any.
    pub fn as_vote_error(&self) -> Option<&VoteError> {
        match self {
            AppError::Vote(err) => Some(err),
            _ => None,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidProposalId(_)
            | AppError::InvalidVoterId(_)
            | AppError::InvalidStatusTransition { .. }
            | AppError::InvalidVoteChoice(_)
            | AppError::InvalidStatus(_)
            | AppError::InvalidEnvironmentVariable { .. }
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::Vote(VoteError::ProposalNotFound(_)) => io::ErrorKind::NotFound,
            AppError::Vote(VoteError::AlreadyVoted { .. }) | AppError::DuplicateProposal(_) => {
                io::ErrorKind::AlreadyExists
            }
            AppError::Vote(VoteError::ProposalNotActive { .. }) => io::ErrorKind::PermissionDenied,
            AppError::Vote(VoteError::LedgerUnavailable(_)) | AppError::LedgerApiError { .. } => {
                io::ErrorKind::ConnectionRefused
            }
            AppError::Prompt(_) => io::ErrorKind::Interrupted,
        }
    }
}

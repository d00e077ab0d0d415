//! shield-vote: confirmation-gated treasury proposal voting with single-vote enforcement.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    ProposalView, VoteOptions, VoteOutcome, list_proposals, show_proposal, treasury_summary, vote,
};
pub use app::ledger::{ProposalListing, VotingLedger};
pub use app::workflow::{VoteIntent, cast_vote};
pub use domain::{
    AppError, Proposal, ProposalFilter, ProposalId, ProposalStatus, Tally, TreasurySummary,
    VoteChoice, VoteError, VoteRecord, VoterId,
};

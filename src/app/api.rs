//! API Facade for the application.
//!
//! Each function loads configuration, builds an [`AppContext`] and runs one
//! operation against its ledger. `config_path` of `None` means
//! `shield-vote.toml` in the working directory, if present.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::console_vote_observer::ConsoleVoteObserver;
use crate::app::AppContext;
use crate::app::workflow::{VoteIntent, cast_vote};
use crate::domain::{ProposalId, VoteChoice, VoterId};
use crate::ports::VoteConfirmer;

pub use crate::app::workflow::VoteOutcome;
pub use crate::domain::{
    AppError, Proposal, ProposalFilter, ProposalStatus, TreasurySummary, VoteRecord,
};

/// A proposal together with the requesting voter's recorded vote, if any.
#[derive(Debug, Clone)]
pub struct ProposalView {
    pub proposal: Proposal,
    pub vote: Option<VoteRecord>,
}

/// Inputs for casting a vote.
#[derive(Debug, Clone)]
pub struct VoteOptions<'a> {
    pub proposal_id: &'a str,
    pub voter_id: &'a str,
    pub choice: &'a str,
}

// =============================================================================
// Proposal queries
// =============================================================================

/// List proposals in seed order, optionally filtered.
pub fn list_proposals(
    config_path: Option<&Path>,
    filter: Option<ProposalFilter>,
) -> Result<Vec<Proposal>, AppError> {
    let ctx = AppContext::load(config_path)?;
    let listing = ctx.ledger().list_proposals(filter);
    Ok(listing.iter().cloned().collect())
}

/// Fetch one proposal, plus the vote `voter_id` cast on it when given.
pub fn show_proposal(
    config_path: Option<&Path>,
    proposal_id: &str,
    voter_id: Option<&str>,
) -> Result<ProposalView, AppError> {
    let proposal_id = ProposalId::new(proposal_id)?;
    let voter_id = voter_id.map(VoterId::new).transpose()?;

    let ctx = AppContext::load(config_path)?;
    let proposal = ctx.ledger().get_proposal(&proposal_id)?;
    let vote = voter_id.and_then(|voter| ctx.ledger().vote_of(&proposal_id, &voter));
    Ok(ProposalView { proposal, vote })
}

/// Aggregate treasury statistics.
pub fn treasury_summary(config_path: Option<&Path>) -> Result<TreasurySummary, AppError> {
    let ctx = AppContext::load(config_path)?;
    Ok(ctx.ledger().summary())
}

// =============================================================================
// Voting
// =============================================================================

/// Cast a vote after `confirmer` approves it.
///
/// Committed votes are echoed to stdout.
pub fn vote(
    config_path: Option<&Path>,
    options: VoteOptions<'_>,
    confirmer: &dyn VoteConfirmer,
) -> Result<VoteOutcome, AppError> {
    let intent = VoteIntent::new(
        ProposalId::new(options.proposal_id)?,
        VoterId::new(options.voter_id)?,
        options.choice.parse::<VoteChoice>()?,
    );

    let ctx = AppContext::load(config_path)?;
    ctx.subscribe(Arc::new(ConsoleVoteObserver));
    cast_vote(ctx.ledger(), intent, confirmer)
}

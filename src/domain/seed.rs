//! Proposal seed file format.
//!
//! ```toml
//! [[proposals]]
//! id = "PROP-001"
//! title = "Marketing Budget Allocation Q4"
//! requested_amount = 150000
//! status = "active"
//! votes_for = 847
//! votes_against = 123
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use super::identifiers::ProposalId;
use super::proposal::{Proposal, ProposalStatus, Tally};
use super::AppError;

/// Seed embedded in the binary.
pub const DEFAULT_SEED: &str = include_str!("../assets/proposals.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedFile {
    #[serde(default)]
    proposals: Vec<SeedProposal>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedProposal {
    id: ProposalId,
    title: String,
    #[serde(default)]
    description: String,
    requested_amount: u64,
    status: ProposalStatus,
    #[serde(default)]
    votes_for: u64,
    #[serde(default)]
    votes_against: u64,
    #[serde(default)]
    time_left: String,
}

/// Parse seed content into proposals, preserving file order.
pub fn parse_seed(content: &str) -> Result<Vec<Proposal>, AppError> {
    let file: SeedFile = toml::from_str(content)?;

    let mut seen = HashSet::new();
    let mut proposals = Vec::with_capacity(file.proposals.len());
    for entry in file.proposals {
        if !seen.insert(entry.id.clone()) {
            return Err(AppError::DuplicateProposal(entry.id));
        }
        if entry.title.trim().is_empty() {
            return Err(AppError::ParseError {
                what: format!("proposal {}", entry.id),
                details: "title must not be empty".to_string(),
            });
        }
        proposals.push(
            Proposal::new(
                entry.id,
                entry.title,
                entry.description,
                entry.requested_amount,
                entry.status,
            )
            .with_tally(Tally::new(entry.votes_for, entry.votes_against))
            .with_time_left(entry.time_left),
        );
    }
    Ok(proposals)
}

/// Parse the embedded seed.
pub fn default_proposals() -> Result<Vec<Proposal>, AppError> {
    parse_seed(DEFAULT_SEED)
}

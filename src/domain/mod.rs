pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod identifiers;
pub mod proposal;
pub mod seed;
pub mod summary;
pub mod vote;

pub use config::{
    AppConfig, HttpLedgerConfig, LedgerBackend, LedgerConfig, ProposalsConfig,
};
pub use error::{AppError, VoteError};
pub use event::VoteRecorded;
pub use filter::ProposalFilter;
pub use identifiers::{ProposalId, VoterId};
pub use proposal::{Proposal, ProposalStatus, Tally, format_amount};
pub use summary::TreasurySummary;
pub use vote::{LedgerReceipt, VoteChoice, VoteRecord};

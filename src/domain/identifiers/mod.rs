pub mod proposal_id;
pub mod validation;
pub mod voter_id;

pub use proposal_id::ProposalId;
pub use voter_id::VoterId;

mod fake_ledger_client;
mod recording_observer;
mod scripted_confirmer;

use crate::domain::{ProposalId, VoterId};

pub use fake_ledger_client::FakeLedgerClient;
pub use recording_observer::RecordingObserver;
pub use scripted_confirmer::ScriptedConfirmer;

pub fn proposal_id(id: &str) -> ProposalId {
    ProposalId::new(id).unwrap()
}

pub fn voter(id: &str) -> VoterId {
    VoterId::new(id).unwrap()
}

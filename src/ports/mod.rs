mod ledger_client;
mod vote_confirmer;
mod vote_observer;

pub use ledger_client::LedgerClient;
pub use vote_confirmer::{ConfirmationRequest, VoteConfirmer};
pub use vote_observer::VoteObserver;

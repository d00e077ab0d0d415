pub mod console_vote_observer;
pub mod journal_ledger_client;
pub mod ledger_client_http;
pub mod ledger_client_retrying;

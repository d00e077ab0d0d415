use std::path::Path;
use std::sync::Arc;

use crate::adapters::journal_ledger_client::JournalLedgerClient;
use crate::adapters::ledger_client_http::HttpLedgerClient;
use crate::adapters::ledger_client_retrying::{RetryPolicy, RetryingLedgerClient};
use crate::app::config::{load_config, load_proposals};
use crate::app::ledger::VotingLedger;
use crate::domain::{AppConfig, AppError, LedgerBackend, VoteError};
use crate::ports::{LedgerClient, VoteObserver};

/// Application context holding the configured ledger for one invocation.
pub struct AppContext {
    config: AppConfig,
    ledger: VotingLedger,
}

impl AppContext {
    /// Create a context around an already-built ledger.
    pub fn new(config: AppConfig, ledger: VotingLedger) -> Self {
        Self { config, ledger }
    }

    /// Load configuration from `config_path` and build the ledger it describes.
    pub fn load(config_path: Option<&Path>) -> Result<Self, AppError> {
        Self::from_config(load_config(config_path)?)
    }

    /// Build the ledger for `config`.
    ///
    /// With the journal backend, votes already in the journal are replayed so
    /// that single-vote enforcement survives across runs; the first entry for
    /// a key wins. With the HTTP backend, tallies are read from the gateway and
    /// the seed counters are kept if it cannot answer.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let proposals = load_proposals(&config.proposals)?;

        let ledger = match config.ledger.backend {
            LedgerBackend::Journal => {
                let client = JournalLedgerClient::new(&config.ledger.journal_path)
                    .with_baseline(proposals.iter().map(|p| (p.id().clone(), p.tally())));
                let records = client.load_records()?;
                let ledger = VotingLedger::with_proposals(Box::new(client), proposals)?;
                for record in records {
                    match ledger.replay(record) {
                        Ok(()) => {}
                        Err(VoteError::ProposalNotFound(id)) => {
                            eprintln!("⚠️  Skipping journal entry for unknown proposal {}", id);
                        }
                        Err(VoteError::AlreadyVoted { proposal, voter }) => {
                            eprintln!(
                                "⚠️  Skipping duplicate journal entry from {} on {}",
                                voter, proposal
                            );
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
                ledger
            }
            LedgerBackend::Http => {
                let http = HttpLedgerClient::new(&config.ledger.http)?;
                let client: Box<dyn LedgerClient> = Box::new(RetryingLedgerClient::new(
                    Box::new(http),
                    RetryPolicy::from_config(&config.ledger.http),
                ));
                let ids: Vec<_> = proposals.iter().map(|p| p.id().clone()).collect();
                let ledger = VotingLedger::with_proposals(client, proposals)?;
                for id in &ids {
                    if let Err(err) = ledger.sync_tallies(id) {
                        eprintln!("⚠️  Showing seed tallies, gateway tallies unavailable: {}", err);
                        break;
                    }
                }
                ledger
            }
        };

        Ok(Self { config, ledger })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn ledger(&self) -> &VotingLedger {
        &self.ledger
    }

    /// Register an observer on the underlying ledger.
    pub fn subscribe(&self, observer: Arc<dyn VoteObserver>) {
        self.ledger.subscribe(observer);
    }
}

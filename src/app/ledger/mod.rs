//! Authoritative in-process registry of proposals and cast votes.
//!
//! `VotingLedger` is the only path through which tallies change. Vote
//! submission is serialized per `(proposal, voter)` key: the key is marked
//! in flight under the state lock, the ledger client is called with the lock
//! released, and the outcome is committed under the lock again. A second
//! submission for the same key blocks until the first settles.

mod listing;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock};

use crate::domain::{
    AppError, Proposal, ProposalFilter, ProposalId, ProposalStatus, TreasurySummary, VoteChoice,
    VoteError, VoteRecord, VoteRecorded, VoterId,
};
use crate::ports::{LedgerClient, VoteObserver};

pub use listing::{ListingIter, ProposalListing};

type VoteKey = (ProposalId, VoterId);

#[derive(Default)]
struct LedgerState {
    proposals: Vec<Proposal>,
    index: HashMap<ProposalId, usize>,
    votes: HashMap<VoteKey, VoteRecord>,
    in_flight: HashSet<VoteKey>,
}

impl LedgerState {
    fn proposal(&self, id: &ProposalId) -> Result<&Proposal, VoteError> {
        self.index
            .get(id)
            .map(|&position| &self.proposals[position])
            .ok_or_else(|| VoteError::ProposalNotFound(id.clone()))
    }

    fn proposal_mut(&mut self, id: &ProposalId) -> Result<&mut Proposal, VoteError> {
        match self.index.get(id) {
            Some(&position) => Ok(&mut self.proposals[position]),
            None => Err(VoteError::ProposalNotFound(id.clone())),
        }
    }

    /// Checks in the order: existence, status, prior vote.
    fn ensure_votable(&self, proposal_id: &ProposalId, voter_id: &VoterId) -> Result<(), VoteError> {
        let proposal = self.proposal(proposal_id)?;
        if !proposal.is_active() {
            return Err(VoteError::ProposalNotActive {
                proposal: proposal_id.clone(),
                status: proposal.status(),
            });
        }
        if self.votes.contains_key(&(proposal_id.clone(), voter_id.clone())) {
            return Err(VoteError::AlreadyVoted {
                proposal: proposal_id.clone(),
                voter: voter_id.clone(),
            });
        }
        Ok(())
    }

    fn commit(&mut self, record: VoteRecord) -> Result<(Proposal, VoteRecorded), VoteError> {
        let key = record.key();
        if self.votes.contains_key(&key) {
            return Err(VoteError::AlreadyVoted { proposal: key.0, voter: key.1 });
        }

        let proposal = self.proposal_mut(&record.proposal_id)?;
        proposal.tally_mut().record(record.choice);
        let updated = proposal.clone();

        let event = VoteRecorded {
            proposal_id: record.proposal_id.clone(),
            voter_id: record.voter_id.clone(),
            choice: record.choice,
            tally: updated.tally(),
        };
        self.votes.insert(key, record);
        Ok((updated, event))
    }
}

/// Registry of proposals and per-voter vote records.
pub struct VotingLedger {
    client: Box<dyn LedgerClient>,
    state: Mutex<LedgerState>,
    settled: Condvar,
    observers: RwLock<Vec<Arc<dyn VoteObserver>>>,
}

impl std::fmt::Debug for VotingLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("VotingLedger")
            .field("proposals", &state.proposals.len())
            .field("votes", &state.votes.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}

impl VotingLedger {
    /// Create an empty ledger backed by the given client.
    pub fn new(client: Box<dyn LedgerClient>) -> Self {
        Self {
            client,
            state: Mutex::new(LedgerState::default()),
            settled: Condvar::new(),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Create a ledger pre-populated with proposals.
    pub fn with_proposals<I>(client: Box<dyn LedgerClient>, proposals: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = Proposal>,
    {
        let ledger = Self::new(client);
        for proposal in proposals {
            ledger.register_proposal(proposal)?;
        }
        Ok(ledger)
    }

    fn lock_state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a proposal. Ids must be unique.
    pub fn register_proposal(&self, proposal: Proposal) -> Result<(), AppError> {
        let mut state = self.lock_state();
        if state.index.contains_key(proposal.id()) {
            return Err(AppError::DuplicateProposal(proposal.id().clone()));
        }
        let position = state.proposals.len();
        state.index.insert(proposal.id().clone(), position);
        state.proposals.push(proposal);
        Ok(())
    }

    /// Register an observer for `VoteRecorded` events.
    pub fn subscribe(&self, observer: Arc<dyn VoteObserver>) {
        self.observers.write().unwrap_or_else(PoisonError::into_inner).push(observer);
    }

    /// Cast a vote.
    ///
    /// The ledger client is called before any local state changes; tallies
    /// move only after it confirms. On success exactly one `VoteRecord` is
    /// created and the updated proposal is returned.
    ///
    /// Proposal status is checked before the client call. A vote the client
    /// confirms counts even if the proposal closed while it was in flight,
    /// matching what a later journal replay would restore. A client rejection
    /// with status 409 means the ledger already holds a vote for the key.
    pub fn submit_vote(
        &self,
        proposal_id: &ProposalId,
        voter_id: &VoterId,
        choice: VoteChoice,
    ) -> Result<Proposal, VoteError> {
        let key: VoteKey = (proposal_id.clone(), voter_id.clone());

        {
            let mut state = self.lock_state();
            loop {
                state.ensure_votable(proposal_id, voter_id)?;
                if !state.in_flight.contains(&key) {
                    break;
                }
                state = self.settled.wait(state).unwrap_or_else(PoisonError::into_inner);
            }
            state.in_flight.insert(key.clone());
        }

        let record = VoteRecord::new(proposal_id.clone(), voter_id.clone(), choice);
        let outcome = self.client.record_vote(&record);

        let (updated, event) = {
            let mut state = self.lock_state();
            state.in_flight.remove(&key);
            self.settled.notify_all();

            let receipt = outcome.map_err(|err| match err {
                AppError::LedgerApiError { status: Some(409), .. } => VoteError::AlreadyVoted {
                    proposal: proposal_id.clone(),
                    voter: voter_id.clone(),
                },
                err => VoteError::LedgerUnavailable(err.to_string()),
            })?;
            state.commit(record.with_receipt(receipt))?
        };

        self.notify(&event);
        Ok(updated)
    }

    /// Apply a vote the ledger client already confirmed in an earlier session.
    ///
    /// Observers are not notified and the proposal status is not checked, as
    /// the vote may predate the proposal closing.
    pub fn replay(&self, record: VoteRecord) -> Result<(), VoteError> {
        let mut state = self.lock_state();
        state.commit(record).map(|_| ())
    }

    pub fn get_proposal(&self, proposal_id: &ProposalId) -> Result<Proposal, VoteError> {
        self.lock_state().proposal(proposal_id).cloned()
    }

    /// Snapshot the proposals, in registration order, under an optional filter.
    pub fn list_proposals(&self, filter: Option<ProposalFilter>) -> ProposalListing {
        let state = self.lock_state();
        ProposalListing::new(state.proposals.clone(), filter.unwrap_or_default())
    }

    pub fn has_voted(&self, proposal_id: &ProposalId, voter_id: &VoterId) -> bool {
        self.lock_state().votes.contains_key(&(proposal_id.clone(), voter_id.clone()))
    }

    pub fn vote_of(&self, proposal_id: &ProposalId, voter_id: &VoterId) -> Option<VoteRecord> {
        self.lock_state().votes.get(&(proposal_id.clone(), voter_id.clone())).cloned()
    }

    /// Reflect an externally decided status change.
    ///
    /// Only `Active -> Passed | Rejected` and `Encrypted -> Active` are accepted.
    pub fn apply_status(
        &self,
        proposal_id: &ProposalId,
        status: ProposalStatus,
    ) -> Result<Proposal, AppError> {
        let mut state = self.lock_state();
        let proposal = state.proposal_mut(proposal_id)?;
        let current = proposal.status();
        if !current.can_transition_to(status) {
            return Err(AppError::InvalidStatusTransition {
                proposal: proposal_id.clone(),
                from: current,
                to: status,
            });
        }
        proposal.set_status(status);
        Ok(proposal.clone())
    }

    /// Replace local tallies with the ledger client's counters.
    pub fn sync_tallies(&self, proposal_id: &ProposalId) -> Result<Proposal, VoteError> {
        self.lock_state().proposal(proposal_id)?;

        let tally = self
            .client
            .read_tallies(proposal_id)
            .map_err(|err| VoteError::LedgerUnavailable(err.to_string()))?;

        let mut state = self.lock_state();
        let proposal = state.proposal_mut(proposal_id)?;
        proposal.set_tally(tally);
        Ok(proposal.clone())
    }

    pub fn summary(&self) -> TreasurySummary {
        let state = self.lock_state();
        TreasurySummary::from_proposals(&state.proposals, state.votes.len())
    }

    fn notify(&self, event: &VoteRecorded) {
        let observers = self.observers.read().unwrap_or_else(PoisonError::into_inner);
        for observer in observers.iter() {
            observer.on_vote_recorded(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    use proptest::prelude::*;

    use super::*;
    use crate::domain::seed::default_proposals;
    use crate::domain::{LedgerReceipt, Tally};
    use crate::testing::{FakeLedgerClient, RecordingObserver, proposal_id, voter};

    fn seeded(client: &FakeLedgerClient) -> VotingLedger {
        VotingLedger::with_proposals(client.boxed(), default_proposals().unwrap()).unwrap()
    }

    fn assert_tally(ledger: &VotingLedger, id: &str, votes_for: u64, votes_against: u64) {
        let proposal = ledger.get_proposal(&proposal_id(id)).unwrap();
        assert_eq!(proposal.votes_for(), votes_for);
        assert_eq!(proposal.votes_against(), votes_against);
        assert_eq!(proposal.total_votes(), votes_for + votes_against);
    }

    #[test]
    fn vote_increments_counter_and_total() {
        let client = FakeLedgerClient::new();
        let ledger = seeded(&client);

        let updated = ledger
            .submit_vote(&proposal_id("PROP-001"), &voter("voterA"), VoteChoice::For)
            .unwrap();

        assert_eq!(updated.votes_for(), 848);
        assert_eq!(updated.votes_against(), 123);
        assert_eq!(updated.total_votes(), 971);
        assert_eq!(client.recorded().len(), 1);
    }

    #[test]
    fn repeated_vote_is_rejected_and_tallies_unchanged() {
        let client = FakeLedgerClient::new();
        let ledger = seeded(&client);
        let prop = proposal_id("PROP-001");
        let voter_a = voter("voterA");

        ledger.submit_vote(&prop, &voter_a, VoteChoice::For).unwrap();
        let err = ledger.submit_vote(&prop, &voter_a, VoteChoice::For).unwrap_err();

        assert_eq!(err, VoteError::AlreadyVoted { proposal: prop.clone(), voter: voter_a.clone() });
        assert_tally(&ledger, "PROP-001", 848, 123);
        assert_eq!(client.attempts(), 1);
    }

    #[test]
    fn changing_choice_does_not_bypass_single_vote() {
        let client = FakeLedgerClient::new();
        let ledger = seeded(&client);
        let prop = proposal_id("PROP-003");

        ledger.submit_vote(&prop, &voter("voterA"), VoteChoice::For).unwrap();
        let err = ledger.submit_vote(&prop, &voter("voterA"), VoteChoice::Against).unwrap_err();

        assert!(matches!(err, VoteError::AlreadyVoted { .. }));
        assert_tally(&ledger, "PROP-003", 655, 298);
    }

    #[test]
    fn encrypted_proposal_rejects_votes_without_record() {
        let client = FakeLedgerClient::new();
        let ledger = seeded(&client);
        let prop = proposal_id("PROP-002");

        let err = ledger.submit_vote(&prop, &voter("voterB"), VoteChoice::For).unwrap_err();

        assert_eq!(
            err,
            VoteError::ProposalNotActive { proposal: prop.clone(), status: ProposalStatus::Encrypted }
        );
        assert!(!ledger.has_voted(&prop, &voter("voterB")));
        assert_eq!(client.attempts(), 0);
    }

    #[test]
    fn closed_proposals_reject_votes() {
        let ledger = seeded(&FakeLedgerClient::new());
        for id in ["PROP-004", "PROP-006"] {
            let err =
                ledger.submit_vote(&proposal_id(id), &voter("voterC"), VoteChoice::Against).unwrap_err();
            assert!(matches!(err, VoteError::ProposalNotActive { .. }));
        }
    }

    #[test]
    fn not_active_wins_over_prior_vote() {
        let ledger = seeded(&FakeLedgerClient::new());
        let prop = proposal_id("PROP-001");
        ledger.submit_vote(&prop, &voter("voterA"), VoteChoice::For).unwrap();
        ledger.apply_status(&prop, ProposalStatus::Passed).unwrap();

        let err = ledger.submit_vote(&prop, &voter("voterA"), VoteChoice::For).unwrap_err();
        assert!(matches!(err, VoteError::ProposalNotActive { .. }));
    }

    #[test]
    fn unknown_proposal_is_not_found() {
        let client = FakeLedgerClient::new();
        let ledger = seeded(&client);
        let prop = proposal_id("PROP-999");

        let err = ledger.submit_vote(&prop, &voter("voterA"), VoteChoice::For).unwrap_err();

        assert_eq!(err, VoteError::ProposalNotFound(prop.clone()));
        assert!(!ledger.has_voted(&prop, &voter("voterA")));
        assert_eq!(ledger.summary().recorded_votes, 0);
        assert!(ledger.get_proposal(&prop).is_err());
    }

    #[test]
    fn ledger_failure_leaves_tallies_untouched_and_allows_retry() {
        let client = FakeLedgerClient::new();
        let ledger = seeded(&client);
        let prop = proposal_id("PROP-001");
        client.fail_next(AppError::LedgerApiError {
            message: "gateway timeout".to_string(),
            status: Some(504),
        });

        let err = ledger.submit_vote(&prop, &voter("voterA"), VoteChoice::Against).unwrap_err();
        assert!(matches!(err, VoteError::LedgerUnavailable(ref msg) if msg.contains("gateway timeout")));
        assert_tally(&ledger, "PROP-001", 847, 123);
        assert!(!ledger.has_voted(&prop, &voter("voterA")));

        let updated = ledger.submit_vote(&prop, &voter("voterA"), VoteChoice::Against).unwrap();
        assert_eq!(updated.votes_against(), 124);
    }

    #[test]
    fn ledger_conflict_reports_already_voted() {
        let client = FakeLedgerClient::new();
        let ledger = seeded(&client);
        let prop = proposal_id("PROP-001");
        client.fail_next(AppError::LedgerApiError {
            message: "already voted".to_string(),
            status: Some(409),
        });

        let err = ledger.submit_vote(&prop, &voter("voterA"), VoteChoice::For).unwrap_err();

        assert_eq!(err, VoteError::AlreadyVoted { proposal: prop.clone(), voter: voter("voterA") });
        assert!(!ledger.has_voted(&prop, &voter("voterA")));
        assert_tally(&ledger, "PROP-001", 847, 123);
    }

    #[test]
    fn confirmed_vote_counts_when_proposal_closes_in_flight() {
        struct GatedClient {
            entered: Arc<Barrier>,
            release: Arc<Barrier>,
        }

        impl LedgerClient for GatedClient {
            fn record_vote(&self, _record: &VoteRecord) -> Result<LedgerReceipt, AppError> {
                self.entered.wait();
                self.release.wait();
                Ok(LedgerReceipt::new("gated"))
            }

            fn read_tallies(&self, _proposal_id: &ProposalId) -> Result<Tally, AppError> {
                Ok(Tally::default())
            }
        }

        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let client = GatedClient { entered: entered.clone(), release: release.clone() };
        let ledger =
            VotingLedger::with_proposals(Box::new(client), default_proposals().unwrap()).unwrap();
        let prop = proposal_id("PROP-001");

        let result = thread::scope(|scope| {
            let handle = scope.spawn(|| ledger.submit_vote(&prop, &voter("voterA"), VoteChoice::For));
            entered.wait();
            ledger.apply_status(&prop, ProposalStatus::Passed).unwrap();
            release.wait();
            handle.join().unwrap()
        });

        let updated = result.unwrap();
        assert_eq!(updated.status(), ProposalStatus::Passed);
        assert_eq!(updated.votes_for(), 848);
        assert!(ledger.has_voted(&prop, &voter("voterA")));
    }

    #[test]
    fn vote_record_keeps_receipt_and_choice() {
        let ledger = seeded(&FakeLedgerClient::new());
        let prop = proposal_id("PROP-003");
        ledger.submit_vote(&prop, &voter("voterA"), VoteChoice::Against).unwrap();

        let record = ledger.vote_of(&prop, &voter("voterA")).unwrap();
        assert_eq!(record.choice, VoteChoice::Against);
        assert_eq!(record.receipt.unwrap().reference, "fake-receipt-1");
        assert!(ledger.vote_of(&prop, &voter("voterB")).is_none());
    }

    #[test]
    fn observers_receive_new_tallies() {
        let ledger = seeded(&FakeLedgerClient::new());
        let observer = Arc::new(RecordingObserver::default());
        ledger.subscribe(observer.clone());

        ledger.submit_vote(&proposal_id("PROP-001"), &voter("voterA"), VoteChoice::For).unwrap();
        let _ = ledger.submit_vote(&proposal_id("PROP-001"), &voter("voterA"), VoteChoice::For);

        let events = observer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].proposal_id.as_str(), "PROP-001");
        assert_eq!(events[0].choice, VoteChoice::For);
        assert_eq!(events[0].tally, Tally::new(848, 123));
    }

    #[test]
    fn concurrent_same_key_submissions_record_once() {
        let client = FakeLedgerClient::new().with_delay(Duration::from_millis(50));
        let ledger = seeded(&client);
        let prop = proposal_id("PROP-001");
        let voter_a = voter("voterA");
        let barrier = Barrier::new(2);

        let results: Vec<Result<Proposal, VoteError>> = thread::scope(|scope| {
            let handles: Vec<_> = [VoteChoice::For, VoteChoice::Against]
                .into_iter()
                .map(|choice| {
                    let (ledger, prop, voter_a, barrier) = (&ledger, &prop, &voter_a, &barrier);
                    scope.spawn(move || {
                        barrier.wait();
                        ledger.submit_vote(prop, voter_a, choice)
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        let successes = results.iter().filter(|result| result.is_ok()).count();
        let already_voted = results
            .iter()
            .filter(|result| matches!(result, Err(VoteError::AlreadyVoted { .. })))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(already_voted, 1);
        assert_eq!(client.recorded().len(), 1);

        let proposal = ledger.get_proposal(&prop).unwrap();
        assert_eq!(proposal.total_votes(), 971);
    }

    #[test]
    fn concurrent_distinct_voters_all_count() {
        let client = FakeLedgerClient::new().with_delay(Duration::from_millis(5));
        let ledger = seeded(&client);
        let prop = proposal_id("PROP-003");

        thread::scope(|scope| {
            for n in 0..8 {
                let (ledger, prop) = (&ledger, &prop);
                scope.spawn(move || {
                    ledger.submit_vote(prop, &voter(&format!("voter-{}", n)), VoteChoice::For).unwrap();
                });
            }
        });

        assert_tally(&ledger, "PROP-003", 662, 298);
        assert_eq!(ledger.summary().recorded_votes, 8);
    }

    #[test]
    fn second_submitter_proceeds_when_first_is_not_confirmed() {
        let client = FakeLedgerClient::new().with_delay(Duration::from_millis(30));
        client.fail_next(AppError::LedgerApiError { message: "down".to_string(), status: None });
        let ledger = seeded(&client);
        let prop = proposal_id("PROP-001");
        let voter_a = voter("voterA");
        let barrier = Barrier::new(2);

        let results: Vec<Result<Proposal, VoteError>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let (ledger, prop, voter_a, barrier) = (&ledger, &prop, &voter_a, &barrier);
                    scope.spawn(move || {
                        barrier.wait();
                        ledger.submit_vote(prop, voter_a, VoteChoice::For)
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        assert!(
            results
                .iter()
                .any(|result| matches!(result, Err(VoteError::LedgerUnavailable(_))))
        );
        assert_tally(&ledger, "PROP-001", 848, 123);
    }

    #[test]
    fn register_rejects_duplicates() {
        let ledger = seeded(&FakeLedgerClient::new());
        let duplicate = default_proposals().unwrap().remove(0);
        assert!(matches!(ledger.register_proposal(duplicate), Err(AppError::DuplicateProposal(_))));
    }

    #[test]
    fn status_transitions_follow_lifecycle() {
        let ledger = seeded(&FakeLedgerClient::new());
        let sealed = proposal_id("PROP-002");

        let err = ledger.apply_status(&sealed, ProposalStatus::Passed).unwrap_err();
        assert!(matches!(err, AppError::InvalidStatusTransition { .. }));

        let opened = ledger.apply_status(&sealed, ProposalStatus::Active).unwrap();
        assert!(opened.is_active());
        assert!(opened.visible_tally().is_some());

        ledger.submit_vote(&sealed, &voter("voterB"), VoteChoice::For).unwrap();
        assert_tally(&ledger, "PROP-002", 1, 0);

        ledger.apply_status(&sealed, ProposalStatus::Rejected).unwrap();
        let err = ledger.apply_status(&sealed, ProposalStatus::Active).unwrap_err();
        assert!(matches!(err, AppError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn apply_status_on_unknown_proposal() {
        let ledger = seeded(&FakeLedgerClient::new());
        let err = ledger.apply_status(&proposal_id("NOPE"), ProposalStatus::Active).unwrap_err();
        assert!(matches!(err, AppError::Vote(VoteError::ProposalNotFound(_))));
    }

    #[test]
    fn replay_restores_votes_without_notifying() {
        let ledger = seeded(&FakeLedgerClient::new());
        let observer = Arc::new(RecordingObserver::default());
        ledger.subscribe(observer.clone());
        let prop = proposal_id("PROP-004");

        ledger.replay(VoteRecord::new(prop.clone(), voter("voterA"), VoteChoice::For)).unwrap();
        let err =
            ledger.replay(VoteRecord::new(prop.clone(), voter("voterA"), VoteChoice::For)).unwrap_err();

        assert!(matches!(err, VoteError::AlreadyVoted { .. }));
        assert!(ledger.has_voted(&prop, &voter("voterA")));
        assert_tally(&ledger, "PROP-004", 1124, 87);
        assert!(observer.events().is_empty());
    }

    #[test]
    fn sync_tallies_replaces_counters() {
        let client = FakeLedgerClient::new();
        let ledger = seeded(&client);
        let prop = proposal_id("PROP-003");
        client.set_tallies(&prop, Tally::new(700, 300));

        let synced = ledger.sync_tallies(&prop).unwrap();
        assert_eq!(synced.total_votes(), 1000);

        let err = ledger.sync_tallies(&proposal_id("PROP-001")).unwrap_err();
        assert!(matches!(err, VoteError::LedgerUnavailable(_)));
        assert_tally(&ledger, "PROP-001", 847, 123);
    }

    #[test]
    fn listing_filters_by_status_and_encryption() {
        let ledger = seeded(&FakeLedgerClient::new());

        assert_eq!(ledger.list_proposals(None).iter().count(), 6);
        let active = ledger.list_proposals(Some(ProposalFilter::status(ProposalStatus::Active)));
        assert_eq!(active.iter().count(), 2);
        let encrypted = ledger.list_proposals(Some(ProposalFilter::encrypted(true)));
        let ids: Vec<_> = encrypted.iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, vec!["PROP-002", "PROP-005"]);
    }

    #[test]
    fn listing_is_a_snapshot() {
        let ledger = seeded(&FakeLedgerClient::new());
        let listing = ledger.list_proposals(None);
        ledger.submit_vote(&proposal_id("PROP-001"), &voter("voterA"), VoteChoice::For).unwrap();

        let snapshot = listing.iter().next().unwrap();
        assert_eq!(snapshot.votes_for(), 847);
        assert_tally(&ledger, "PROP-001", 848, 123);
    }

    #[test]
    fn summary_counts_recorded_votes() {
        let ledger = seeded(&FakeLedgerClient::new());
        ledger.submit_vote(&proposal_id("PROP-001"), &voter("voterA"), VoteChoice::For).unwrap();
        ledger.submit_vote(&proposal_id("PROP-003"), &voter("voterA"), VoteChoice::Against).unwrap();

        let summary = ledger.summary();
        assert_eq!(summary.recorded_votes, 2);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.votes_cast, 970 + 952 + 1210 + 1023 + 2);
    }

    fn vote_strategy() -> impl Strategy<Value = Vec<(u8, u8, bool)>> {
        prop::collection::vec((0u8..4, 0u8..5, any::<bool>()), 0..40)
    }

    proptest! {
        #[test]
        fn at_most_one_vote_per_key_and_totals_consistent(votes in vote_strategy()) {
            let client = FakeLedgerClient::new();
            let ledger = seeded(&client);
            let ids = ["PROP-001", "PROP-002", "PROP-003", "PROP-404"];
            let before: Vec<_> = ledger.list_proposals(None).iter().cloned().collect();

            let mut accepted = HashSet::new();
            for (p, v, for_vote) in votes {
                let prop = proposal_id(ids[p as usize]);
                let voter_id = voter(&format!("voter-{}", v));
                let choice = if for_vote { VoteChoice::For } else { VoteChoice::Against };
                let result = ledger.submit_vote(&prop, &voter_id, choice);

                let key = (prop.clone(), voter_id.clone());
                match result {
                    Ok(updated) => {
                        prop_assert!(accepted.insert(key));
                        prop_assert!(updated.is_active());
                        prop_assert_eq!(updated.total_votes(), updated.votes_for() + updated.votes_against());
                    }
                    Err(VoteError::AlreadyVoted { .. }) => prop_assert!(accepted.contains(&key)),
                    Err(VoteError::ProposalNotActive { .. }) => prop_assert_eq!(prop.as_str(), "PROP-002"),
                    Err(VoteError::ProposalNotFound(_)) => prop_assert_eq!(prop.as_str(), "PROP-404"),
                    Err(other) => prop_assert!(false, "unexpected error: {}", other),
                }
            }

            prop_assert_eq!(client.recorded().len(), accepted.len());
            prop_assert_eq!(ledger.summary().recorded_votes, accepted.len());

            for original in &before {
                let current = ledger.get_proposal(original.id()).unwrap();
                let added = accepted.iter().filter(|(p, _)| p == original.id()).count() as u64;
                prop_assert_eq!(current.total_votes(), original.total_votes() + added);
                prop_assert_eq!(current.total_votes(), current.votes_for() + current.votes_against());
            }
        }
    }
}

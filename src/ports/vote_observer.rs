use crate::domain::VoteRecorded;

/// Port for subscribers to committed votes (console output, audit trails).
pub trait VoteObserver: Send + Sync {
    fn on_vote_recorded(&self, event: &VoteRecorded);
}

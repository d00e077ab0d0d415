use std::sync::Mutex;

use crate::domain::VoteRecorded;
use crate::ports::VoteObserver;

/// Observer that keeps every event it receives.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<VoteRecorded>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<VoteRecorded> {
        self.events.lock().unwrap().clone()
    }
}

impl VoteObserver for RecordingObserver {
    fn on_vote_recorded(&self, event: &VoteRecorded) {
        self.events.lock().unwrap().push(event.clone());
    }
}

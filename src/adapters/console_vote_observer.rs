use crate::domain::VoteRecorded;
use crate::ports::VoteObserver;

/// Prints a confirmation line for every committed vote.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleVoteObserver;

impl ConsoleVoteObserver {
    pub fn format(event: &VoteRecorded) -> String {
        format!(
            "✅ Vote recorded: {} voted {} on {} (for {} / against {})",
            event.voter_id.abbreviated(),
            event.choice.as_str().to_uppercase(),
            event.proposal_id,
            event.tally.votes_for,
            event.tally.votes_against
        )
    }
}

impl VoteObserver for ConsoleVoteObserver {
    fn on_vote_recorded(&self, event: &VoteRecorded) {
        println!("{}", Self::format(event));
    }
}

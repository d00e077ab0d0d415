//! `vote` command.

use std::path::Path;

use super::confirm::{DialoguerConfirmer, TypedConfirmation};
use super::proposals::render_card;
use crate::app::api::{self, VoteOptions, VoteOutcome};
use crate::domain::AppError;
use crate::ports::VoteConfirmer;

pub fn run_vote(
    config: Option<&Path>,
    proposal_id: &str,
    voter: &str,
    choice: &str,
    confirm: Option<&str>,
) -> Result<(), AppError> {
    let typed;
    let interactive = DialoguerConfirmer;
    let confirmer: &dyn VoteConfirmer = match confirm {
        Some(expected) => {
            typed = TypedConfirmation::new(expected);
            &typed
        }
        None => &interactive,
    };

    let options = VoteOptions { proposal_id, voter_id: voter, choice };
    match api::vote(config, options, confirmer)? {
        VoteOutcome::Recorded(proposal) => {
            println!("\n{}", render_card(&proposal));
        }
        VoteOutcome::Abandoned => {
            println!("⚠️  Vote cancelled; nothing was submitted");
        }
    }
    Ok(())
}

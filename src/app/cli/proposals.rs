//! `list`, `show` and `stats` commands.

use std::path::Path;

use crate::app::api::{self, ProposalView};
use crate::domain::{
    AppError, Proposal, ProposalFilter, ProposalStatus, TreasurySummary, format_amount,
};

pub fn run_list(
    config: Option<&Path>,
    status: Option<String>,
    encrypted: bool,
    public: bool,
) -> Result<(), AppError> {
    let mut filter = ProposalFilter::default();
    if let Some(status) = status {
        filter.status = Some(status.parse::<ProposalStatus>()?);
    }
    if encrypted {
        filter.encrypted = Some(true);
    } else if public {
        filter.encrypted = Some(false);
    }

    let proposals = api::list_proposals(config, Some(filter))?;
    if proposals.is_empty() {
        println!("ℹ️ No proposals match");
        return Ok(());
    }
    for proposal in &proposals {
        println!("{}", list_line(proposal));
    }
    Ok(())
}

pub fn run_show(config: Option<&Path>, id: &str, voter: Option<&str>) -> Result<(), AppError> {
    let view = api::show_proposal(config, id, voter)?;
    println!("{}", render_card(&view.proposal));
    print_vote_line(&view, voter);
    Ok(())
}

pub fn run_stats(config: Option<&Path>) -> Result<(), AppError> {
    let summary = api::treasury_summary(config)?;
    println!("{}", render_summary(&summary));
    Ok(())
}

fn print_vote_line(view: &ProposalView, voter: Option<&str>) {
    let Some(voter) = voter else {
        return;
    };
    match &view.vote {
        Some(record) => println!(
            "✅ {} voted {} on {}",
            voter,
            record.choice.as_str().to_uppercase(),
            record.recorded_at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => println!("ℹ️ {} has not voted on this proposal", voter),
    }
}

pub(crate) fn list_line(proposal: &Proposal) -> String {
    let votes = match proposal.visible_tally() {
        Some(tally) => format!("{} for / {} against", tally.votes_for, tally.votes_against),
        None => "votes hidden".to_string(),
    };
    format!(
        "{:<10} {:<10} {:>12}  {}  ({})",
        proposal.id().as_str(),
        proposal.status().as_str().to_uppercase(),
        proposal.formatted_amount(),
        proposal.title(),
        votes
    )
}

pub(crate) fn render_card(proposal: &Proposal) -> String {
    let mut lines = vec![
        format!("{}  {}", proposal.id(), proposal.title()),
        format!("Status:    {}", proposal.status().as_str().to_uppercase()),
        format!("Requested: {}", proposal.formatted_amount()),
    ];
    if !proposal.time_left().is_empty() {
        lines.push(format!("Timing:    {}", proposal.time_left()));
    }
    match proposal.visible_tally() {
        Some(tally) => {
            lines.push(format!(
                "For:       {} ({:.1}%)",
                tally.votes_for,
                tally.for_percentage()
            ));
            lines.push(format!(
                "Against:   {} ({:.1}%)",
                tally.votes_against,
                tally.against_percentage()
            ));
            lines.push(format!("Total:     {}", tally.total()));
        }
        None => lines.push("Votes:     encrypted until voting opens".to_string()),
    }
    if !proposal.description().is_empty() {
        lines.push(String::new());
        lines.push(proposal.description().to_string());
    }
    lines.join("\n")
}

fn render_summary(summary: &TreasurySummary) -> String {
    [
        format!("Proposals:         {}", summary.total_proposals),
        format!("  Active:          {}", summary.active),
        format!("  Encrypted:       {}", summary.encrypted),
        format!("  Passed:          {}", summary.passed),
        format!("  Rejected:        {}", summary.rejected),
        format!("Requested (open):  {}", format_amount(summary.requested_active)),
        format!("Votes cast:        {}", summary.votes_cast),
        format!("Recorded here:     {}", summary.recorded_votes),
    ]
    .join("\n")
}

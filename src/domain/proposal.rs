//! Treasury proposal model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AppError;
use super::identifiers::ProposalId;
use super::vote::VoteChoice;

/// Lifecycle status of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Open for voting.
    Active,
    /// Voting closed in favour.
    Passed,
    /// Voting closed against.
    Rejected,
    /// Sealed until the voting window opens; tallies are hidden.
    Encrypted,
}

impl ProposalStatus {
    /// All statuses in display order.
    pub const ALL: [ProposalStatus; 4] = [
        ProposalStatus::Active,
        ProposalStatus::Passed,
        ProposalStatus::Rejected,
        ProposalStatus::Encrypted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Active => "active",
            ProposalStatus::Passed => "passed",
            ProposalStatus::Rejected => "rejected",
            ProposalStatus::Encrypted => "encrypted",
        }
    }

    /// Passed and Rejected never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProposalStatus::Passed | ProposalStatus::Rejected)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// `Active -> Passed | Rejected` closes voting, `Encrypted -> Active` opens it.
    pub fn can_transition_to(&self, next: ProposalStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (ProposalStatus::Active, ProposalStatus::Passed)
                | (ProposalStatus::Active, ProposalStatus::Rejected)
                | (ProposalStatus::Encrypted, ProposalStatus::Active)
        )
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(ProposalStatus::Active),
            "passed" => Ok(ProposalStatus::Passed),
            "rejected" => Ok(ProposalStatus::Rejected),
            "encrypted" => Ok(ProposalStatus::Encrypted),
            _ => Err(AppError::InvalidStatus(s.to_string())),
        }
    }
}

/// Vote counters for one proposal.
///
/// The total is always computed from the two counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub votes_for: u64,
    pub votes_against: u64,
}

impl Tally {
    pub fn new(votes_for: u64, votes_against: u64) -> Self {
        Self { votes_for, votes_against }
    }

    pub fn total(&self) -> u64 {
        self.votes_for + self.votes_against
    }

    /// Count one more vote for `choice`.
    pub fn record(&mut self, choice: VoteChoice) {
        match choice {
            VoteChoice::For => self.votes_for += 1,
            VoteChoice::Against => self.votes_against += 1,
        }
    }

    pub fn for_percentage(&self) -> f64 {
        percentage(self.votes_for, self.total())
    }

    pub fn against_percentage(&self) -> f64 {
        percentage(self.votes_against, self.total())
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64) * 100.0
}

/// A treasury spending request subject to voting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    id: ProposalId,
    title: String,
    description: String,
    requested_amount: u64,
    status: ProposalStatus,
    #[serde(flatten)]
    tally: Tally,
    time_left: String,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        title: impl Into<String>,
        description: impl Into<String>,
        requested_amount: u64,
        status: ProposalStatus,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            requested_amount,
            status,
            tally: Tally::default(),
            time_left: String::new(),
        }
    }

    /// Seed initial counters.
    pub fn with_tally(mut self, tally: Tally) -> Self {
        self.tally = tally;
        self
    }

    pub fn with_time_left(mut self, time_left: impl Into<String>) -> Self {
        self.time_left = time_left.into();
        self
    }

    pub fn id(&self) -> &ProposalId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn requested_amount(&self) -> u64 {
        self.requested_amount
    }

    pub fn status(&self) -> ProposalStatus {
        self.status
    }

    pub fn time_left(&self) -> &str {
        &self.time_left
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn votes_for(&self) -> u64 {
        self.tally.votes_for
    }

    pub fn votes_against(&self) -> u64 {
        self.tally.votes_against
    }

    pub fn total_votes(&self) -> u64 {
        self.tally.total()
    }

    pub fn is_active(&self) -> bool {
        self.status == ProposalStatus::Active
    }

    pub fn is_encrypted(&self) -> bool {
        self.status == ProposalStatus::Encrypted
    }

    /// Tallies as shown to voters; hidden while the proposal is encrypted.
    pub fn visible_tally(&self) -> Option<Tally> {
        if self.is_encrypted() { None } else { Some(self.tally) }
    }

    /// Requested amount rendered with a currency sign and thousands separators.
    pub fn formatted_amount(&self) -> String {
        format_amount(self.requested_amount)
    }

    pub(crate) fn tally_mut(&mut self) -> &mut Tally {
        &mut self.tally
    }

    pub(crate) fn set_tally(&mut self, tally: Tally) {
        self.tally = tally;
    }

    pub(crate) fn set_status(&mut self, status: ProposalStatus) {
        self.status = status;
    }
}

/// Format a whole-unit amount as `$150,000`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

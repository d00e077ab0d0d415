use super::proposal::{Proposal, ProposalStatus};

/// Predicate over proposal status and the encrypted flag.
///
/// An empty filter matches every proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProposalFilter {
    pub status: Option<ProposalStatus>,
    pub encrypted: Option<bool>,
}

impl ProposalFilter {
    pub fn status(status: ProposalStatus) -> Self {
        Self { status: Some(status), encrypted: None }
    }

    pub fn encrypted(encrypted: bool) -> Self {
        Self { status: None, encrypted: Some(encrypted) }
    }

    pub fn matches(&self, proposal: &Proposal) -> bool {
        if let Some(status) = self.status {
            if proposal.status() != status {
                return false;
            }
        }
        if let Some(encrypted) = self.encrypted {
            if proposal.is_encrypted() != encrypted {
                return false;
            }
        }
        true
    }
}

use crate::domain::{Proposal, ProposalFilter};

/// Snapshot of proposals taken from the ledger.
///
/// Filtering happens lazily on each [`ProposalListing::iter`] call, so the
/// listing can be walked any number of times.
#[derive(Debug, Clone)]
pub struct ProposalListing {
    proposals: Vec<Proposal>,
    filter: ProposalFilter,
}

impl ProposalListing {
    pub(crate) fn new(proposals: Vec<Proposal>, filter: ProposalFilter) -> Self {
        Self { proposals, filter }
    }

    pub fn filter(&self) -> ProposalFilter {
        self.filter
    }

    pub fn iter(&self) -> ListingIter<'_> {
        ListingIter { inner: self.proposals.iter(), filter: self.filter }
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a> IntoIterator for &'a ProposalListing {
    type Item = &'a Proposal;
    type IntoIter = ListingIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the proposals of a listing that match its filter.
#[derive(Debug, Clone)]
pub struct ListingIter<'a> {
    inner: std::slice::Iter<'a, Proposal>,
    filter: ProposalFilter,
}

impl<'a> Iterator for ListingIter<'a> {
    type Item = &'a Proposal;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.inner.find(|proposal| filter.matches(proposal))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

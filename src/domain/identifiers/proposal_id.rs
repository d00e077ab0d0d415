use super::super::AppError;
use crate::impl_validated_id;

/// A validated proposal identifier such as `PROP-001`.
///
/// Guarantees:
/// - Non-empty
/// - Contains only ASCII alphanumeric characters, `-`, or `_`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProposalId(String);

impl_validated_id!(ProposalId, false, AppError::InvalidProposalId);

impl From<ProposalId> for String {
    fn from(val: ProposalId) -> Self {
        val.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_proposal_id() {
        assert!(ProposalId::new("PROP-001").is_ok());
    }

    #[test]
    fn empty_id_is_invalid() {
        assert!(matches!(ProposalId::new(""), Err(AppError::InvalidProposalId(_))));
    }

    #[test]
    fn dotted_id_is_invalid() {
        assert!(ProposalId::new("PROP.001").is_err());
    }

    #[test]
    fn parses_from_str() {
        let id: ProposalId = "PROP-003".parse().unwrap();
        assert_eq!(id.as_str(), "PROP-003");
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: ProposalId = serde_json::from_str("\"PROP-004\"").unwrap();
        assert_eq!(ok.to_string(), "PROP-004");
        assert!(serde_json::from_str::<ProposalId>("\"bad id\"").is_err());
    }
}

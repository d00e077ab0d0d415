use super::super::AppError;
use crate::impl_validated_id;

/// A validated voter identifier.
///
/// Accepts wallet addresses (`0xAbC...`) as well as dotted names such as
/// `alice.eth`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoterId(String);

impl_validated_id!(VoterId, true, AppError::InvalidVoterId);

impl VoterId {
    /// Shortened form used in console output: `0x1234...abcd`.
    pub fn abbreviated(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 12 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

//! Formatting of vehicle-to-vehicle messages before they are recorded

use crate::error::{ChainError, Result};

/// Looks up a member by its 1-based roster position.
pub fn member_at(members: &[String], position: usize) -> Result<&str> {
    position
        .checked_sub(1)
        .and_then(|i| members.get(i))
        .map(String::as_str)
        .ok_or(ChainError::InvalidMemberIndex {
            index: position,
            members: members.len(),
        })
}

/// Builds the record text for a message from `sender` to `recipient`, both
/// given as 1-based roster positions. `text` is recorded verbatim.
pub fn compose(members: &[String], sender: usize, recipient: usize, text: &str) -> Result<String> {
    let from = member_at(members, sender)?;
    let to = member_at(members, recipient)?;
    Ok(format!("From {} to {}: {}", from, to, text))
}

//! Key layout shared by every backend.

/// Legacy yes/no poll counters and voter set.
pub const LEGACY_YES_VOTES: &str = "yesVotes";
pub const LEGACY_NO_VOTES: &str = "noVotes";
pub const LEGACY_VOTED_USERS: &str = "votedUsers";

/// Hash holding `title`, `deadline` and `options` for a poll.
pub fn poll(poll_id: &str) -> String {
    format!("vote:{}", poll_id)
}

/// Counter for a 1-based option index.
pub fn option_votes(poll_id: &str, option_index: usize) -> String {
    format!("votes:{}:{}", poll_id, option_index)
}

/// Set of user ids that already voted in a poll.
pub fn voted_users(poll_id: &str) -> String {
    format!("votedUsers:{}", poll_id)
}

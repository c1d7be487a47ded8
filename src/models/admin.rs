//! Admin request and response bodies.

use serde::{Deserialize, Serialize};

use super::{OptionResult, Poll};

/// Legacy global ledger as shown on the admin page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySnapshot {
    pub yes_votes: u64,
    pub no_votes: u64,
    pub voted_users: Vec<String>,
}

/// Admin write actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    ResetYes,
    ResetNo,
    ResetAll,
    ResetUser,
    ResetVote,
}

impl AdminAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reset-yes" => Some(AdminAction::ResetYes),
            "reset-no" => Some(AdminAction::ResetNo),
            "reset-all" => Some(AdminAction::ResetAll),
            "reset-user" => Some(AdminAction::ResetUser),
            "reset-vote" => Some(AdminAction::ResetVote),
            _ => None,
        }
    }
}

/// Request body for `POST /api/admin`.
///
/// `action` stays a loose string; a missing or unknown one is answered
/// with `Invalid action`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub vote_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminMessage {
    pub message: String,
}

impl AdminMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A poll with its live tally, for inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollDetails {
    #[serde(flatten)]
    pub poll: Poll,
    pub tally: Vec<u64>,
    pub total_votes: u64,
    pub results: Vec<OptionResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!(AdminAction::parse("reset-all"), Some(AdminAction::ResetAll));
        assert_eq!(AdminAction::parse("reset-vote"), Some(AdminAction::ResetVote));
        assert_eq!(AdminAction::parse("drop-tables"), None);
    }

    #[test]
    fn test_request_without_action() {
        let request: AdminRequest = serde_json::from_str("{}").unwrap();
        assert!(request.action.is_none());
        assert!(request.user_id.is_none());
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let snapshot = LegacySnapshot {
            yes_votes: 1,
            no_votes: 2,
            voted_users: vec!["a".into()],
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["yesVotes"], 1);
        assert_eq!(json["noVotes"], 2);
        assert_eq!(json["votedUsers"][0], "a");
    }
}

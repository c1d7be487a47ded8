//! Admin operations over the legacy ledger and per-poll state.
//!
//! Multi-key resets are independent writes; a failure part way through leaves
//! the earlier writes applied.

use crate::errors::AppError;
use crate::models::{LegacySnapshot, PollDetails};
use crate::store::{get_count, keys, SharedStore};

use super::{PollRepository, VoteLedger};

#[derive(Clone)]
pub struct AdminOps {
    store: SharedStore,
    polls: PollRepository,
    ledger: VoteLedger,
}

impl AdminOps {
    pub fn new(store: SharedStore) -> Self {
        Self {
            polls: PollRepository::new(store.clone()),
            ledger: VoteLedger::new(store.clone()),
            store,
        }
    }

    pub async fn get_snapshot(&self) -> Result<LegacySnapshot, AppError> {
        let yes_votes = get_count(self.store.as_ref(), keys::LEGACY_YES_VOTES).await?;
        let no_votes = get_count(self.store.as_ref(), keys::LEGACY_NO_VOTES).await?;
        let voted_users = self.store.smembers(keys::LEGACY_VOTED_USERS).await?;

        Ok(LegacySnapshot {
            yes_votes,
            no_votes,
            voted_users,
        })
    }

    pub async fn reset_yes(&self) -> Result<(), AppError> {
        self.store.set(keys::LEGACY_YES_VOTES, "0").await?;
        tracing::info!("Legacy yes votes reset");
        Ok(())
    }

    pub async fn reset_no(&self) -> Result<(), AppError> {
        self.store.set(keys::LEGACY_NO_VOTES, "0").await?;
        tracing::info!("Legacy no votes reset");
        Ok(())
    }

    /// Zero both counters and forget every legacy voter.
    pub async fn reset_all(&self) -> Result<(), AppError> {
        self.store.set(keys::LEGACY_YES_VOTES, "0").await?;
        self.store.set(keys::LEGACY_NO_VOTES, "0").await?;
        self.store.del(keys::LEGACY_VOTED_USERS).await?;
        tracing::warn!("Legacy ledger reset");
        Ok(())
    }

    /// Let one user vote again on the legacy poll. Per-poll voter sets are untouched.
    pub async fn reset_user(&self, user_id: &str) -> Result<(), AppError> {
        let removed = self.store.srem(keys::LEGACY_VOTED_USERS, user_id).await?;
        tracing::info!(user_id, removed, "Legacy voter reset");
        Ok(())
    }

    /// Clear the tally and voter set of one poll.
    pub async fn reset_vote(&self, vote_id: &str) -> Result<(), AppError> {
        let poll = self.polls.require_poll(vote_id).await?;
        self.ledger.reset_poll(&poll).await?;
        tracing::warn!(poll_id = %vote_id, "Poll tally reset");
        Ok(())
    }

    pub async fn lookup_vote(&self, vote_id: &str) -> Result<PollDetails, AppError> {
        let poll = self.polls.require_poll(vote_id).await?;
        self.ledger.details(poll).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LegacyLedger;
    use crate::models::NewPoll;
    use crate::store::test_support::temp_store;

    #[tokio::test]
    async fn test_snapshot_defaults_to_zero() {
        let (store, _dir) = temp_store().await;
        let admin = AdminOps::new(store);

        let snapshot = admin.get_snapshot().await.unwrap();
        assert_eq!(snapshot.yes_votes, 0);
        assert_eq!(snapshot.no_votes, 0);
        assert!(snapshot.voted_users.is_empty());
    }

    #[tokio::test]
    async fn test_reset_all_scenario() {
        let (store, _dir) = temp_store().await;
        store.set(keys::LEGACY_YES_VOTES, "5").await.unwrap();
        store.set(keys::LEGACY_NO_VOTES, "3").await.unwrap();
        store.sadd(keys::LEGACY_VOTED_USERS, "a").await.unwrap();
        store.sadd(keys::LEGACY_VOTED_USERS, "b").await.unwrap();

        let admin = AdminOps::new(store);
        let before = admin.get_snapshot().await.unwrap();
        assert_eq!((before.yes_votes, before.no_votes), (5, 3));
        assert_eq!(before.voted_users, vec!["a", "b"]);

        admin.reset_all().await.unwrap();

        assert_eq!(
            admin.get_snapshot().await.unwrap(),
            LegacySnapshot {
                yes_votes: 0,
                no_votes: 0,
                voted_users: vec![],
            }
        );
    }

    #[tokio::test]
    async fn test_single_counter_resets() {
        let (store, _dir) = temp_store().await;
        store.set(keys::LEGACY_YES_VOTES, "4").await.unwrap();
        store.set(keys::LEGACY_NO_VOTES, "2").await.unwrap();
        let admin = AdminOps::new(store);

        admin.reset_yes().await.unwrap();
        let snapshot = admin.get_snapshot().await.unwrap();
        assert_eq!((snapshot.yes_votes, snapshot.no_votes), (0, 2));

        admin.reset_no().await.unwrap();
        let snapshot = admin.get_snapshot().await.unwrap();
        assert_eq!((snapshot.yes_votes, snapshot.no_votes), (0, 0));
    }

    #[tokio::test]
    async fn test_reset_user_only_touches_legacy_set() {
        let (store, _dir) = temp_store().await;
        let legacy = LegacyLedger::new(store.clone());
        let polls = PollRepository::new(store.clone());
        let ledger = VoteLedger::new(store.clone());
        let admin = AdminOps::new(store);

        let id = polls
            .create_poll(&NewPoll {
                title: "T".into(),
                deadline: "2030-01-01T00:00:00.000Z".into(),
                options: vec!["x".into(), "y".into()],
            })
            .await
            .unwrap();
        let poll = polls.require_poll(&id).await.unwrap();

        legacy.cast_vote("eve", 1).await.unwrap();
        ledger.cast_vote(&poll, "eve", 1).await.unwrap();

        admin.reset_user("eve").await.unwrap();

        assert!(!legacy.has_voted("eve").await.unwrap());
        assert!(ledger.has_voted(&id, "eve").await.unwrap());
        // Counter stays; only the voter entry is removed
        assert_eq!(legacy.tally().await.unwrap(), (1, 0));
    }

    #[tokio::test]
    async fn test_reset_and_lookup_vote() {
        let (store, _dir) = temp_store().await;
        let polls = PollRepository::new(store.clone());
        let ledger = VoteLedger::new(store.clone());
        let admin = AdminOps::new(store);

        let id = polls
            .create_poll(&NewPoll {
                title: "Lunch".into(),
                deadline: "2030-01-01T00:00:00.000Z".into(),
                options: vec!["Pizza".into(), "Sushi".into(), "Tacos".into()],
            })
            .await
            .unwrap();
        let poll = polls.require_poll(&id).await.unwrap();
        ledger.cast_vote(&poll, "u1", 3).await.unwrap();
        ledger.cast_vote(&poll, "u2", 3).await.unwrap();

        let details = admin.lookup_vote(&id).await.unwrap();
        assert_eq!(details.tally, vec![0, 0, 2]);
        assert_eq!(details.total_votes, 2);
        assert_eq!(details.results[2].percentage, "100.0");

        admin.reset_vote(&id).await.unwrap();
        let details = admin.lookup_vote(&id).await.unwrap();
        assert_eq!(details.tally, vec![0, 0, 0]);
        assert!(!ledger.has_voted(&id, "u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_vote_id() {
        let (store, _dir) = temp_store().await;
        let admin = AdminOps::new(store);

        assert!(matches!(
            admin.reset_vote("missing").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            admin.lookup_vote("missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}

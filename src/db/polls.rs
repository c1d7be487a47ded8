//! Poll repository: create and read poll records.

use crate::errors::AppError;
use crate::models::{parse_options, NewPoll, Poll};
use crate::store::{keys, SharedStore};

#[derive(Clone)]
pub struct PollRepository {
    store: SharedStore,
}

impl PollRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Store a validated poll under a fresh id and return the id.
    pub async fn create_poll(&self, poll: &NewPoll) -> Result<String, AppError> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let options_json = serde_json::to_string(&poll.options)
            .map_err(|e| AppError::Internal(format!("Failed to encode options: {}", e)))?;

        self.store
            .hset(
                &keys::poll(&id),
                &[
                    ("title", poll.title.clone()),
                    ("deadline", poll.deadline.clone()),
                    ("options", options_json),
                ],
            )
            .await?;

        tracing::info!(poll_id = %id, options = poll.options.len(), "Poll created");
        Ok(id)
    }

    /// Read a poll; `None` if no record exists under the id.
    pub async fn get_poll(&self, id: &str) -> Result<Option<Poll>, AppError> {
        let mut fields = self.store.hgetall(&keys::poll(id)).await?;
        if fields.is_empty() {
            return Ok(None);
        }

        let options = fields
            .remove("options")
            .map(|raw| parse_options(&raw))
            .unwrap_or_default();

        Ok(Some(Poll {
            id: id.to_string(),
            title: fields.remove("title").unwrap_or_default(),
            deadline: fields.remove("deadline").unwrap_or_default(),
            options,
        }))
    }

    /// Like [`get_poll`](Self::get_poll) but missing polls are an error.
    pub async fn require_poll(&self, id: &str) -> Result<Poll, AppError> {
        self.get_poll(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vote {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::temp_store;

    fn new_poll(options: &[&str]) -> NewPoll {
        NewPoll {
            title: "Favourite colour".to_string(),
            deadline: "2030-01-01T00:00:00.000Z".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_create_and_read_back() {
        let (store, _dir) = temp_store().await;
        let repo = PollRepository::new(store);

        let id = repo
            .create_poll(&new_poll(&["Red", "Blue", "Green"]))
            .await
            .unwrap();
        let poll = repo.get_poll(&id).await.unwrap().unwrap();

        assert_eq!(poll.id, id);
        assert_eq!(poll.title, "Favourite colour");
        assert_eq!(poll.options, vec!["Red", "Blue", "Green"]);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let (store, _dir) = temp_store().await;
        let repo = PollRepository::new(store);

        let a = repo.create_poll(&new_poll(&["a", "b"])).await.unwrap();
        let b = repo.create_poll(&new_poll(&["a", "b"])).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_reads_comma_joined_options() {
        let (store, _dir) = temp_store().await;
        store
            .hset(
                &keys::poll("legacy-form"),
                &[
                    ("title", "Old".to_string()),
                    ("deadline", "2030-01-01T00:00:00Z".to_string()),
                    ("options", "Red,Blue,Green".to_string()),
                ],
            )
            .await
            .unwrap();

        let repo = PollRepository::new(store);
        let poll = repo.get_poll("legacy-form").await.unwrap().unwrap();
        assert_eq!(poll.options, vec!["Red", "Blue", "Green"]);
    }

    #[tokio::test]
    async fn test_missing_poll() {
        let (store, _dir) = temp_store().await;
        let repo = PollRepository::new(store);

        assert!(repo.get_poll("nope").await.unwrap().is_none());
        assert!(matches!(
            repo.require_poll("nope").await,
            Err(AppError::NotFound(_))
        ));
    }
}

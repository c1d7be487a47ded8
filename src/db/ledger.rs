//! Vote ledgers: one vote per user, per-option tallies.
//!
//! Recording a vote adds the user to the voter set first and only increments
//! the option counter when that add was new. Two racing submissions from the
//! same user therefore increment at most once. A crash between the two writes
//! leaves the voter recorded without a count; that loss is accepted.

use crate::errors::AppError;
use crate::models::{compute_results, Poll, PollDetails};
use crate::store::{get_count, keys, SharedStore};

/// Outcome of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub accepted: bool,
}

impl VoteOutcome {
    const ACCEPTED: Self = Self { accepted: true };
    const ALREADY_VOTED: Self = Self { accepted: false };
}

/// Per-poll ledger.
#[derive(Clone)]
pub struct VoteLedger {
    store: SharedStore,
}

impl VoteLedger {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn has_voted(&self, poll_id: &str, user_id: &str) -> Result<bool, AppError> {
        self.store
            .sismember(&keys::voted_users(poll_id), user_id)
            .await
    }

    /// Record `user_id`'s vote for the 1-based `option_index`.
    ///
    /// Users who already voted get `accepted: false` whatever index they send.
    pub async fn cast_vote(
        &self,
        poll: &Poll,
        user_id: &str,
        option_index: u32,
    ) -> Result<VoteOutcome, AppError> {
        if self.has_voted(&poll.id, user_id).await? {
            tracing::debug!(poll_id = %poll.id, user_id, "Repeat vote ignored");
            return Ok(VoteOutcome::ALREADY_VOTED);
        }

        let index = option_index as usize;
        if index < 1 || index > poll.option_count() {
            return Err(AppError::InvalidOption {
                index: option_index,
                option_count: poll.option_count(),
            });
        }

        if !self
            .store
            .sadd(&keys::voted_users(&poll.id), user_id)
            .await?
        {
            tracing::debug!(poll_id = %poll.id, user_id, "Concurrent repeat vote ignored");
            return Ok(VoteOutcome::ALREADY_VOTED);
        }

        self.store
            .incr(&keys::option_votes(&poll.id, index))
            .await?;

        tracing::info!(poll_id = %poll.id, option = index, "Vote recorded");
        Ok(VoteOutcome::ACCEPTED)
    }

    /// Counts in option order, one per option; unset counters read as 0.
    pub async fn get_tally(&self, poll: &Poll) -> Result<Vec<u64>, AppError> {
        let mut counts = Vec::with_capacity(poll.option_count());
        for index in 1..=poll.option_count() {
            counts.push(get_count(self.store.as_ref(), &keys::option_votes(&poll.id, index)).await?);
        }
        Ok(counts)
    }

    /// Poll with its tally and computed results.
    pub async fn details(&self, poll: Poll) -> Result<PollDetails, AppError> {
        let tally = self.get_tally(&poll).await?;
        let results = compute_results(&poll.options, &tally);

        Ok(PollDetails {
            total_votes: tally.iter().sum(),
            tally,
            results,
            poll,
        })
    }

    /// Drop every option counter and the voter set of a poll.
    pub async fn reset_poll(&self, poll: &Poll) -> Result<(), AppError> {
        for index in 1..=poll.option_count() {
            self.store
                .del(&keys::option_votes(&poll.id, index))
                .await?;
        }
        self.store.del(&keys::voted_users(&poll.id)).await
    }
}

/// Button labels of the hard-coded legacy poll.
pub const LEGACY_OPTIONS: [&str; 2] = ["Yes", "No"];

pub const LEGACY_QUESTION: &str = "Will Dune: Part II gross over $100M on opening weekend?";

/// The singleton yes/no poll from the first version of the service.
#[derive(Clone)]
pub struct LegacyLedger {
    store: SharedStore,
}

impl LegacyLedger {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn has_voted(&self, user_id: &str) -> Result<bool, AppError> {
        self.store
            .sismember(keys::LEGACY_VOTED_USERS, user_id)
            .await
    }

    /// Button 1 counts as yes, button 2 as no.
    pub async fn cast_vote(&self, user_id: &str, button_index: u32) -> Result<VoteOutcome, AppError> {
        if self.has_voted(user_id).await? {
            return Ok(VoteOutcome::ALREADY_VOTED);
        }

        let counter = match button_index {
            1 => keys::LEGACY_YES_VOTES,
            2 => keys::LEGACY_NO_VOTES,
            _ => {
                return Err(AppError::InvalidOption {
                    index: button_index,
                    option_count: LEGACY_OPTIONS.len(),
                })
            }
        };

        if !self.store.sadd(keys::LEGACY_VOTED_USERS, user_id).await? {
            return Ok(VoteOutcome::ALREADY_VOTED);
        }
        self.store.incr(counter).await?;

        tracing::info!(counter, "Legacy vote recorded");
        Ok(VoteOutcome::ACCEPTED)
    }

    /// `(yes, no)` counts.
    pub async fn tally(&self) -> Result<(u64, u64), AppError> {
        let yes = get_count(self.store.as_ref(), keys::LEGACY_YES_VOTES).await?;
        let no = get_count(self.store.as_ref(), keys::LEGACY_NO_VOTES).await?;
        Ok((yes, no))
    }
}

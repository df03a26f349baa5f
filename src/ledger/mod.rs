//! Vote accounting with re-vote correction.
//!
//! A voter's tally contribution belongs to exactly one choice of a question
//! at any time. [`cast_vote`] holds that invariant: first votes increment
//! the chosen tally, re-votes move the contribution by decrementing the old
//! choice and incrementing the new one, and re-selecting the same choice
//! writes nothing. The accounting runs against the [`VoteStore`] seam so it
//! can be exercised without a live MongoDB.

pub mod mongo;

#[cfg(test)]
pub mod memory;

use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::question_models::Question;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("no such choice under this question: {0}")]
    InvalidChoice(String),

    #[error("vote store error: {0}")]
    Store(String),
}

/// A voter's current selection as the store knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredVote {
    pub choice_id: String,
}

/// Data access required by the accounting logic. The Mongo implementation
/// rides a client session so the three operations commit as one unit.
pub trait VoteStore {
    async fn find_vote(
        &mut self,
        question_id: &ObjectId,
        voter_id: &ObjectId,
    ) -> Result<Option<StoredVote>, LedgerError>;

    /// Create the (question, voter) vote if absent, otherwise reassign its
    /// choice. Never produces a second record for the same pair.
    async fn upsert_vote(
        &mut self,
        question_id: &ObjectId,
        voter_id: &ObjectId,
        choice_id: &str,
    ) -> Result<(), LedgerError>;

    async fn adjust_tally(
        &mut self,
        question_id: &ObjectId,
        choice_id: &str,
        delta: i64,
    ) -> Result<(), LedgerError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastOutcome {
    /// First vote by this voter on this question.
    FirstVote,
    /// The vote moved from `previous` to the new choice.
    Revote { previous: String },
    /// Same choice re-selected; nothing was written.
    Unchanged,
}

/// Record `voter_id`'s vote for `choice_id` on `question`, correcting any
/// prior selection. After it returns Ok, the voter has exactly one vote for
/// the question, pointing at `choice_id`, and the sum of the question's
/// tallies equals its number of vote records.
pub async fn cast_vote<S: VoteStore>(
    store: &mut S,
    question: &Question,
    voter_id: &ObjectId,
    choice_id: &str,
) -> Result<CastOutcome, LedgerError> {
    if question.find_choice(choice_id).is_none() {
        return Err(LedgerError::InvalidChoice(choice_id.to_string()));
    }

    match store.find_vote(&question.id, voter_id).await? {
        Some(previous) if previous.choice_id == choice_id => Ok(CastOutcome::Unchanged),
        Some(previous) => {
            store
                .adjust_tally(&question.id, &previous.choice_id, -1)
                .await?;
            store.adjust_tally(&question.id, choice_id, 1).await?;
            store.upsert_vote(&question.id, voter_id, choice_id).await?;
            Ok(CastOutcome::Revote {
                previous: previous.choice_id,
            })
        }
        None => {
            store.adjust_tally(&question.id, choice_id, 1).await?;
            store.upsert_vote(&question.id, voter_id, choice_id).await?;
            Ok(CastOutcome::FirstVote)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryVoteStore;
    use super::*;
    use crate::models::question_models::Choice;
    use mongodb::bson::DateTime;

    fn two_choice_question() -> Question {
        Question {
            id: ObjectId::new(),
            question_text: "Best editor?".to_string(),
            created_by: ObjectId::new(),
            pub_date: DateTime::now(),
            end_date: None,
            choices: vec![
                Choice { id: "a".into(), choice_text: "vim".into(), votes: 0 },
                Choice { id: "b".into(), choice_text: "emacs".into(), votes: 0 },
            ],
        }
    }

    #[tokio::test]
    async fn first_vote_increments_tally_and_creates_one_record() {
        let question = two_choice_question();
        let mut store = MemoryVoteStore::new(&question);
        let voter = ObjectId::new();

        let outcome = cast_vote(&mut store, &question, &voter, "a").await.unwrap();

        assert_eq!(outcome, CastOutcome::FirstVote);
        assert_eq!(store.tally(&question.id, "a"), 1);
        assert_eq!(store.tally(&question.id, "b"), 0);
        assert_eq!(store.vote_count(&question.id), 1);
    }

    #[tokio::test]
    async fn same_choice_revote_changes_nothing() {
        let question = two_choice_question();
        let mut store = MemoryVoteStore::new(&question);
        let voter = ObjectId::new();

        cast_vote(&mut store, &question, &voter, "a").await.unwrap();
        let outcome = cast_vote(&mut store, &question, &voter, "a").await.unwrap();

        assert_eq!(outcome, CastOutcome::Unchanged);
        assert_eq!(store.tally(&question.id, "a"), 1);
        assert_eq!(store.tally(&question.id, "b"), 0);
        assert_eq!(store.vote_count(&question.id), 1);
    }

    #[tokio::test]
    async fn revote_moves_tally_and_keeps_single_record() {
        let question = two_choice_question();
        let mut store = MemoryVoteStore::new(&question);
        let voter = ObjectId::new();

        cast_vote(&mut store, &question, &voter, "a").await.unwrap();
        let outcome = cast_vote(&mut store, &question, &voter, "b").await.unwrap();

        assert_eq!(outcome, CastOutcome::Revote { previous: "a".into() });
        assert_eq!(store.tally(&question.id, "a"), 0);
        assert_eq!(store.tally(&question.id, "b"), 1);
        assert_eq!(store.vote_count(&question.id), 1);
        assert_eq!(
            store.find_vote(&question.id, &voter).await.unwrap(),
            Some(StoredVote { choice_id: "b".into() })
        );
    }

    #[tokio::test]
    async fn unknown_choice_is_rejected_without_writes() {
        let question = two_choice_question();
        let mut store = MemoryVoteStore::new(&question);
        let voter = ObjectId::new();

        let err = cast_vote(&mut store, &question, &voter, "zzz")
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::InvalidChoice(_)));
        assert_eq!(store.tally(&question.id, "a"), 0);
        assert_eq!(store.vote_count(&question.id), 0);
    }

    #[tokio::test]
    async fn tally_sum_tracks_distinct_voters_across_revotes() {
        // V1 votes A, re-votes B, then V2 votes B: A=0, B=2, total = 2.
        let question = two_choice_question();
        let mut store = MemoryVoteStore::new(&question);
        let v1 = ObjectId::new();
        let v2 = ObjectId::new();

        cast_vote(&mut store, &question, &v1, "a").await.unwrap();
        assert_eq!(store.tally(&question.id, "a"), 1);
        assert_eq!(store.tally(&question.id, "b"), 0);

        cast_vote(&mut store, &question, &v1, "b").await.unwrap();
        assert_eq!(store.tally(&question.id, "a"), 0);
        assert_eq!(store.tally(&question.id, "b"), 1);

        cast_vote(&mut store, &question, &v2, "b").await.unwrap();
        assert_eq!(store.tally(&question.id, "a"), 0);
        assert_eq!(store.tally(&question.id, "b"), 2);

        assert_eq!(store.tally_sum(&question.id), 2);
        assert_eq!(store.vote_count(&question.id), 2);
    }

    #[tokio::test]
    async fn invariant_holds_across_arbitrary_revote_sequence() {
        let question = two_choice_question();
        let mut store = MemoryVoteStore::new(&question);
        let voters: Vec<ObjectId> = (0..5).map(|_| ObjectId::new()).collect();

        let sequence = [
            (0, "a"), (1, "b"), (2, "a"), (0, "b"), (3, "b"),
            (1, "b"), (4, "a"), (2, "b"), (0, "a"),
        ];
        for (voter, choice) in sequence {
            cast_vote(&mut store, &question, &voters[voter], choice)
                .await
                .unwrap();
            assert_eq!(
                store.tally_sum(&question.id),
                store.vote_count(&question.id) as i64
            );
        }

        assert_eq!(store.vote_count(&question.id), 5);
    }
}

//! MongoDB-backed [`VoteStore`].
//!
//! All operations ride one client session with an open transaction, so the
//! (find previous vote, tally adjustments, vote upsert) unit commits or
//! aborts as a whole. Concurrent re-votes by the same voter conflict on the
//! shared vote document and one transaction aborts; concurrent *first*
//! votes insert distinct documents the snapshot reads cannot see, so the
//! unique (question_id, voter_id) index on `votes` is what aborts the
//! duplicate commit.

use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::{ClientSession, Collection, Database};

use super::{LedgerError, StoredVote, VoteStore};
use crate::models::question_models::Question;
use crate::models::vote_record_models::VoteRecord;

pub struct MongoVoteStore {
    questions: Collection<Question>,
    votes: Collection<VoteRecord>,
    session: ClientSession,
}

impl MongoVoteStore {
    /// Open a session on the database's client and start the transaction.
    pub async fn begin(db: &Database) -> Result<Self, LedgerError> {
        let mut session = db
            .client()
            .start_session()
            .await
            .map_err(|e| LedgerError::Store(e.to_string()))?;
        session
            .start_transaction()
            .await
            .map_err(|e| LedgerError::Store(e.to_string()))?;
        Ok(Self {
            questions: db.collection("questions"),
            votes: db.collection("votes"),
            session,
        })
    }

    pub async fn commit(mut self) -> Result<(), LedgerError> {
        self.session
            .commit_transaction()
            .await
            .map_err(|e| LedgerError::Store(e.to_string()))
    }
}

impl VoteStore for MongoVoteStore {
    async fn find_vote(
        &mut self,
        question_id: &ObjectId,
        voter_id: &ObjectId,
    ) -> Result<Option<StoredVote>, LedgerError> {
        let record = self
            .votes
            .find_one(doc! { "question_id": *question_id, "voter_id": *voter_id })
            .session(&mut self.session)
            .await
            .map_err(|e| LedgerError::Store(e.to_string()))?;
        Ok(record.map(|r| StoredVote { choice_id: r.choice_id }))
    }

    async fn upsert_vote(
        &mut self,
        question_id: &ObjectId,
        voter_id: &ObjectId,
        choice_id: &str,
    ) -> Result<(), LedgerError> {
        self.votes
            .update_one(
                doc! { "question_id": *question_id, "voter_id": *voter_id },
                doc! {
                    "$set": { "choice_id": choice_id },
                    "$setOnInsert": { "created_at": DateTime::now() },
                },
            )
            .upsert(true)
            .session(&mut self.session)
            .await
            .map_err(|e| LedgerError::Store(e.to_string()))?;
        Ok(())
    }

    async fn adjust_tally(
        &mut self,
        question_id: &ObjectId,
        choice_id: &str,
        delta: i64,
    ) -> Result<(), LedgerError> {
        let result = self
            .questions
            .update_one(
                doc! { "_id": *question_id, "choices.id": choice_id },
                doc! { "$inc": { "choices.$.votes": delta } },
            )
            .session(&mut self.session)
            .await
            .map_err(|e| LedgerError::Store(e.to_string()))?;
        if result.matched_count == 0 {
            return Err(LedgerError::InvalidChoice(choice_id.to_string()));
        }
        Ok(())
    }
}

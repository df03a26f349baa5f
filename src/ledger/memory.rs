//! In-memory [`VoteStore`] used by the ledger tests.

use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;

use super::{LedgerError, StoredVote, VoteStore};
use crate::models::question_models::Question;

pub struct MemoryVoteStore {
    tallies: HashMap<(ObjectId, String), i64>,
    votes: HashMap<(ObjectId, ObjectId), String>,
}

impl MemoryVoteStore {
    pub fn new(question: &Question) -> Self {
        let tallies = question
            .choices
            .iter()
            .map(|c| ((question.id, c.id.clone()), c.votes))
            .collect();
        Self { tallies, votes: HashMap::new() }
    }

    pub fn tally(&self, question_id: &ObjectId, choice_id: &str) -> i64 {
        self.tallies
            .get(&(*question_id, choice_id.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn tally_sum(&self, question_id: &ObjectId) -> i64 {
        self.tallies
            .iter()
            .filter(|((qid, _), _)| qid == question_id)
            .map(|(_, votes)| votes)
            .sum()
    }

    pub fn vote_count(&self, question_id: &ObjectId) -> usize {
        self.votes.keys().filter(|(qid, _)| qid == question_id).count()
    }
}

impl VoteStore for MemoryVoteStore {
    async fn find_vote(
        &mut self,
        question_id: &ObjectId,
        voter_id: &ObjectId,
    ) -> Result<Option<StoredVote>, LedgerError> {
        Ok(self
            .votes
            .get(&(*question_id, *voter_id))
            .map(|choice_id| StoredVote { choice_id: choice_id.clone() }))
    }

    async fn upsert_vote(
        &mut self,
        question_id: &ObjectId,
        voter_id: &ObjectId,
        choice_id: &str,
    ) -> Result<(), LedgerError> {
        self.votes
            .insert((*question_id, *voter_id), choice_id.to_string());
        Ok(())
    }

    async fn adjust_tally(
        &mut self,
        question_id: &ObjectId,
        choice_id: &str,
        delta: i64,
    ) -> Result<(), LedgerError> {
        *self
            .tallies
            .entry((*question_id, choice_id.to_string()))
            .or_insert(0) += delta;
        Ok(())
    }
}

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A voter's single current selection for a question. At most one document
/// exists per (question_id, voter_id); re-votes reassign `choice_id` in
/// place rather than inserting a second record.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoteRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub question_id: ObjectId,

    pub voter_id: ObjectId,

    pub choice_id: String,

    pub created_at: DateTime,
}

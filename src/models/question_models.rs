use chrono::{Duration, Utc};
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub question_text: String,
    pub created_by: ObjectId,
    pub pub_date: DateTime,
    pub end_date: Option<DateTime>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Choice {
    pub id: String,
    pub choice_text: String,
    pub votes: i64,
}

impl Question {
    /// True once the publication date has passed.
    pub fn is_published(&self) -> bool {
        Utc::now() >= self.pub_date.to_chrono()
    }

    /// True while the voting window is open: published, and either no end
    /// date or the end date has not been reached yet.
    pub fn can_vote(&self) -> bool {
        let now = Utc::now();
        self.is_published()
            && self
                .end_date
                .map_or(true, |end| now < end.to_chrono())
    }

    /// True if publication happened within the last 24 hours.
    pub fn was_published_recently(&self) -> bool {
        let now = Utc::now();
        let published = self.pub_date.to_chrono();
        now - Duration::days(1) <= published && published <= now
    }

    pub fn find_choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }

    /// Choices ordered by tally descending, the display order for results.
    pub fn choices_by_votes(&self) -> Vec<Choice> {
        let mut choices = self.choices.clone();
        choices.sort_by(|a, b| b.votes.cmp(&a.votes));
        choices
    }
}

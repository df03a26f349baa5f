use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question_models::Question;

#[derive(Deserialize)]
pub struct IndexParams {
    pub error: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct IndexResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub questions: Vec<QuestionSummary>,
}

#[derive(Serialize, Debug)]
pub struct QuestionSummary {
    pub id: String,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub can_vote: bool,
    pub published_recently: bool,
}

impl QuestionSummary {
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id.to_hex(),
            question_text: question.question_text.clone(),
            pub_date: question.pub_date.to_chrono(),
            end_date: question.end_date.map(|d| d.to_chrono()),
            can_vote: question.can_vote(),
            published_recently: question.was_published_recently(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct BallotChoice {
    pub id: String,
    pub choice_text: String,
}

/// The ballot page payload. `submit_label` flips to "Re-Vote" and
/// `previous_choice` is pre-filled once the voter has already voted.
#[derive(Serialize, Debug)]
pub struct BallotResponse {
    pub id: String,
    pub question_text: String,
    pub choices: Vec<BallotChoice>,
    pub previous_choice: Option<String>,
    pub submit_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl BallotResponse {
    pub fn from_question(
        question: &Question,
        previous_choice: Option<String>,
        error_message: Option<String>,
    ) -> Self {
        Self {
            id: question.id.to_hex(),
            question_text: question.question_text.clone(),
            choices: question
                .choices
                .iter()
                .map(|c| BallotChoice {
                    id: c.id.clone(),
                    choice_text: c.choice_text.clone(),
                })
                .collect(),
            submit_label: if previous_choice.is_some() { "Re-Vote" } else { "Vote" },
            previous_choice,
            error_message,
        }
    }
}

#[derive(Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ChoiceTally {
    pub id: String,
    pub choice_text: String,
    pub votes: i64,
}

#[derive(Serialize, Debug)]
pub struct ResultsResponse {
    pub id: String,
    pub question_text: String,
    pub choices: Vec<ChoiceTally>,
}

impl ResultsResponse {
    /// Choices come out tally-descending, the display order for results.
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id.to_hex(),
            question_text: question.question_text.clone(),
            choices: question
                .choices_by_votes()
                .into_iter()
                .map(|c| ChoiceTally {
                    id: c.id,
                    choice_text: c.choice_text,
                    votes: c.votes,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CreateQuestionRequest {
    pub question_text: String,
    pub choices: Vec<String>,
    pub pub_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Flash codes carried on the index redirect, mapped back to the human
/// message when the index renders.
pub mod flash {
    use axum::response::Redirect;

    pub const QUESTION_NOT_FOUND: &str = "question-not-found";
    pub const VOTING_NOT_ALLOWED: &str = "voting-not-allowed";
    pub const RESULTS_NOT_AVAILABLE: &str = "results-not-available";

    pub fn message(code: &str) -> Option<&'static str> {
        match code {
            QUESTION_NOT_FOUND => Some("That question does not exist."),
            VOTING_NOT_ALLOWED => Some("That question is not allowed for voting."),
            RESULTS_NOT_AVAILABLE => Some("Results for that question are not available yet."),
            _ => None,
        }
    }

    pub fn redirect_to_index(code: &str) -> Redirect {
        Redirect::to(&format!("/polls/?error={code}"))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn known_codes_map_to_messages() {
            assert_eq!(
                message(QUESTION_NOT_FOUND),
                Some("That question does not exist.")
            );
            assert_eq!(
                message(VOTING_NOT_ALLOWED),
                Some("That question is not allowed for voting.")
            );
        }

        #[test]
        fn unknown_codes_render_nothing() {
            assert_eq!(message("made-up"), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question_models::{Choice, Question};
    use mongodb::bson::{oid::ObjectId, DateTime};

    fn ballot_question() -> Question {
        Question {
            id: ObjectId::new(),
            question_text: "Best editor?".to_string(),
            created_by: ObjectId::new(),
            pub_date: DateTime::now(),
            end_date: None,
            choices: vec![
                Choice { id: "a".into(), choice_text: "vim".into(), votes: 3 },
                Choice { id: "b".into(), choice_text: "emacs".into(), votes: 1 },
            ],
        }
    }

    #[test]
    fn fresh_ballot_has_vote_label_and_no_prefill() {
        let question = ballot_question();
        let ballot = BallotResponse::from_question(&question, None, None);
        assert_eq!(ballot.submit_label, "Vote");
        assert!(ballot.previous_choice.is_none());
        assert!(ballot.error_message.is_none());
        assert_eq!(ballot.choices.len(), 2);
    }

    #[test]
    fn prior_vote_prefills_choice_and_flips_label_to_revote() {
        let question = ballot_question();
        let ballot = BallotResponse::from_question(&question, Some("a".into()), None);
        assert_eq!(ballot.submit_label, "Re-Vote");
        assert_eq!(ballot.previous_choice.as_deref(), Some("a"));
    }
}

use axum::{
    extract::{Extension, State},
    Json,
};
use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use tracing::info;

use crate::controllers::poll_controllers::models::{CreateQuestionRequest, ResultsResponse};
use crate::models::question_models::{Choice, Question};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;

/// Create a question with its choices. Publication defaults to now; an end
/// date, when given, must fall after publication.
pub async fn create_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateQuestionRequest>,
) -> AppResult<Json<ResultsResponse>> {
    let questions_collection = state.db.collection::<Question>("questions");

    if payload.question_text.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Question text must not be empty".to_string(),
        ));
    }

    let choice_texts: Vec<String> = payload
        .choices
        .iter()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    if choice_texts.len() < 2 {
        return Err(AppError::ValidationError(
            "Enter at least 2 choices for voters to select from".to_string(),
        ));
    }

    let mut deduped = Vec::new();
    for text in &choice_texts {
        if !deduped.contains(text) {
            deduped.push(text.clone());
        }
    }
    if deduped.len() != choice_texts.len() {
        return Err(AppError::ValidationError(
            "Choices must be unique".to_string(),
        ));
    }

    let pub_date = payload.pub_date.unwrap_or_else(Utc::now);
    if let Some(end_date) = payload.end_date {
        if end_date <= pub_date {
            return Err(AppError::ValidationError(
                "End date must fall after the publication date".to_string(),
            ));
        }
    }

    let created_by = ObjectId::parse_str(&claims.sub)
        .map_err(|_| AppError::BadRequest("Invalid user id".to_string()))?;

    let question = Question {
        id: ObjectId::new(),
        question_text: payload.question_text.trim().to_string(),
        created_by,
        pub_date: DateTime::from_chrono(pub_date),
        end_date: payload.end_date.map(DateTime::from_chrono),
        choices: choice_texts
            .into_iter()
            .map(|choice_text| Choice {
                id: ObjectId::new().to_hex(),
                choice_text,
                votes: 0,
            })
            .collect(),
    };

    questions_collection.insert_one(&question).await?;

    info!(question = %question.id, creator = %created_by, "question created");

    Ok(Json(ResultsResponse::from_question(&question)))
}

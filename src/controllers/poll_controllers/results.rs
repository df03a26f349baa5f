use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::{doc, oid::ObjectId};

use crate::controllers::poll_controllers::models::{flash, ResultsResponse};
use crate::models::question_models::Question;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Tallies for a published question, ordered by votes descending. Results
/// stay visible after the voting window closes; unpublished questions
/// redirect back to the index.
pub async fn question_results(
    Path(question_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Response> {
    let questions_collection = state.db.collection::<Question>("questions");

    let Ok(obj_id) = ObjectId::parse_str(&question_id) else {
        return Ok(flash::redirect_to_index(flash::QUESTION_NOT_FOUND).into_response());
    };

    let Some(question) = questions_collection.find_one(doc! { "_id": obj_id }).await? else {
        return Ok(flash::redirect_to_index(flash::QUESTION_NOT_FOUND).into_response());
    };

    if !question.is_published() {
        return Ok(flash::redirect_to_index(flash::RESULTS_NOT_AVAILABLE).into_response());
    }

    Ok(Json(ResultsResponse::from_question(&question)).into_response())
}

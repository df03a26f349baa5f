use axum::{
    extract::{Extension, Path, State},
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::{doc, oid::ObjectId};

use crate::controllers::poll_controllers::models::{flash, BallotResponse};
use crate::models::{question_models::Question, vote_record_models::VoteRecord};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;

/// Ballot page. Gated on the voting window: a missing question or a closed
/// window sends the voter back to the index with a flash code.
pub async fn question_detail(
    Path(question_id): Path<String>,
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Response> {
    let questions_collection = state.db.collection::<Question>("questions");

    let Ok(obj_id) = ObjectId::parse_str(&question_id) else {
        return Ok(flash::redirect_to_index(flash::QUESTION_NOT_FOUND).into_response());
    };

    let Some(question) = questions_collection.find_one(doc! { "_id": obj_id }).await? else {
        return Ok(flash::redirect_to_index(flash::QUESTION_NOT_FOUND).into_response());
    };

    if !question.can_vote() {
        return Ok(flash::redirect_to_index(flash::VOTING_NOT_ALLOWED).into_response());
    }

    let voter_id = ObjectId::parse_str(&claims.sub)
        .map_err(|_| AppError::BadRequest("Invalid user id".to_string()))?;

    let previous_choice = state
        .db
        .collection::<VoteRecord>("votes")
        .find_one(doc! { "question_id": obj_id, "voter_id": voter_id })
        .await?
        .map(|vote| vote.choice_id);

    Ok(Json(BallotResponse::from_question(&question, previous_choice, None)).into_response())
}

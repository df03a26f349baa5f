use axum::{
    extract::{Extension, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use mongodb::bson::{doc, oid::ObjectId};
use tracing::info;

use crate::controllers::poll_controllers::models::{flash, BallotResponse, VoteForm};
use crate::ledger::mongo::MongoVoteStore;
use crate::ledger::{cast_vote, LedgerError};
use crate::models::{question_models::Question, vote_record_models::VoteRecord};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;

/// Record the submitted `choice` through the vote ledger. On success the
/// voter lands on the results page; a missing or unknown choice re-renders
/// the ballot with an inline error instead.
pub async fn submit_vote(
    Path(question_id): Path<String>,
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Form(form): Form<VoteForm>,
) -> AppResult<Response> {
    let questions_collection = state.db.collection::<Question>("questions");

    let obj_id = ObjectId::parse_str(&question_id)
        .map_err(|_| AppError::NotFound("That question does not exist.".to_string()))?;

    let question = questions_collection
        .find_one(doc! { "_id": obj_id })
        .await?
        .ok_or_else(|| AppError::NotFound("That question does not exist.".to_string()))?;

    if !question.can_vote() {
        return Ok(flash::redirect_to_index(flash::VOTING_NOT_ALLOWED).into_response());
    }

    let voter_id = ObjectId::parse_str(&claims.sub)
        .map_err(|_| AppError::BadRequest("Invalid user id".to_string()))?;

    let Some(choice_id) = form.choice else {
        return ballot_with_error(&state, &question, &voter_id).await;
    };

    let mut store = MongoVoteStore::begin(&state.db).await?;
    match cast_vote(&mut store, &question, &voter_id, &choice_id).await {
        Ok(outcome) => {
            store.commit().await?;
            info!(
                question = %question.id,
                voter = %voter_id,
                choice = %choice_id,
                ?outcome,
                "vote recorded"
            );
            Ok(Redirect::to(&format!("/polls/{question_id}/results")).into_response())
        }
        // Dropping the store aborts the open transaction.
        Err(LedgerError::InvalidChoice(_)) => ballot_with_error(&state, &question, &voter_id).await,
        Err(err) => Err(err.into()),
    }
}

/// Re-render the ballot with the inline "no selection" error, keeping any
/// prior choice pre-filled.
async fn ballot_with_error(
    state: &AppState,
    question: &Question,
    voter_id: &ObjectId,
) -> AppResult<Response> {
    let previous_choice = state
        .db
        .collection::<VoteRecord>("votes")
        .find_one(doc! { "question_id": question.id, "voter_id": *voter_id })
        .await?
        .map(|vote| vote.choice_id);

    Ok(Json(BallotResponse::from_question(
        question,
        previous_choice,
        Some("You didn't select a choice.".to_string()),
    ))
    .into_response())
}

use axum::{
    extract::{Query, State},
    Json,
};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, DateTime};

use crate::controllers::poll_controllers::models::{flash, IndexParams, IndexResponse, QuestionSummary};
use crate::models::question_models::Question;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Published questions, newest first. Future-dated questions stay hidden.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> AppResult<Json<IndexResponse>> {
    let questions_collection = state.db.collection::<Question>("questions");

    let mut cursor = questions_collection
        .find(doc! { "pub_date": { "$lte": DateTime::now() } })
        .sort(doc! { "pub_date": -1 })
        .await?;

    let mut questions = Vec::new();
    while let Some(question) = cursor.try_next().await? {
        questions.push(QuestionSummary::from_question(&question));
    }

    let message = params
        .error
        .as_deref()
        .and_then(flash::message)
        .map(str::to_string);

    Ok(Json(IndexResponse { message, questions }))
}

use axum::{
    extract::{Extension, State},
    Json,
};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::controllers::poll_controllers::models::QuestionSummary;
use crate::models::question_models::Question;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;

/// Questions created by the signed-in user, newest first, including ones
/// not yet published.
pub async fn my_questions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<QuestionSummary>>> {
    let questions_collection = state.db.collection::<Question>("questions");

    let creator_id = ObjectId::parse_str(&claims.sub)
        .map_err(|_| AppError::BadRequest("Invalid user id".to_string()))?;

    let questions: Vec<Question> = questions_collection
        .find(doc! { "created_by": creator_id })
        .sort(doc! { "pub_date": -1 })
        .await?
        .try_collect()
        .await?;

    Ok(Json(
        questions.iter().map(QuestionSummary::from_question).collect(),
    ))
}

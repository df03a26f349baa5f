use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::controllers::poll_controllers::{create_question, detail, index, mine, results, vote};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn poll_routes(state: AppState) -> Router {
    // The index and results pages are public; the ballot, voting and
    // content creation require a session.
    let public = Router::new()
        .route("/", get(index::list_questions))
        .route("/:questionId/results", get(results::question_results));

    let protected = Router::new()
        .route("/create", post(create_question::create_question))
        .route("/mine", get(mine::my_questions))
        .route("/:questionId", get(detail::question_detail))
        .route("/:questionId/vote", post(vote::submit_vote))
        .route_layer(middleware::from_fn(jwt_auth));

    public.merge(protected).with_state(state)
}

pub mod question_models;
pub mod user_models;
pub mod vote_record_models;

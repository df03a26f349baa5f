pub mod create_question;
pub mod detail;
pub mod index;
pub mod mine;
pub mod models;
pub mod results;
pub mod vote;

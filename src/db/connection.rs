use dotenvy::dotenv;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use std::env;
use tracing::info;

use crate::models::{user_models::User, vote_record_models::VoteRecord};
use crate::utils::error::{AppError, AppResult};

pub async fn init_db() -> AppResult<Database> {
    dotenv().ok();

    let mongo_uri = env::var("MONGO_URI")
        .map_err(|_| AppError::InternalError("MONGO_URI must be set in .env".to_string()))?;
    let db_name = env::var("DB_NAME")
        .map_err(|_| AppError::InternalError("DB_NAME must be set in .env".to_string()))?;

    let mut client_options = ClientOptions::parse(&mongo_uri)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse MongoDB URI: {e}")))?;

    client_options.app_name = Some("polls-backend".to_string());

    let client = Client::with_options(client_options)
        .map_err(|e| AppError::DatabaseError(format!("Failed to initialize MongoDB client: {e}")))?;

    let db = client.database(&db_name);
    ensure_indexes(&db).await?;

    info!("database connection established");

    Ok(db)
}

/// One vote document per (question, voter). Transactions run snapshot-
/// isolated, so two concurrent first votes can both pass the find and
/// insert distinct documents; the unique index aborts the second commit.
fn unique_vote_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "question_id": 1, "voter_id": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

/// Usernames are unique; the index backs the check-then-insert in
/// registration against concurrent registrations of the same name.
fn unique_username_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "username": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

async fn ensure_indexes(db: &Database) -> AppResult<()> {
    db.collection::<VoteRecord>("votes")
        .create_index(unique_vote_index())
        .await?;
    db.collection::<User>("users")
        .create_index(unique_username_index())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_index_is_unique_over_question_and_voter() {
        let index = unique_vote_index();
        assert_eq!(index.keys, doc! { "question_id": 1, "voter_id": 1 });
        assert_eq!(index.options.and_then(|opts| opts.unique), Some(true));
    }

    #[test]
    fn username_index_is_unique() {
        let index = unique_username_index();
        assert_eq!(index.keys, doc! { "username": 1 });
        assert_eq!(index.options.and_then(|opts| opts.unique), Some(true));
    }
}

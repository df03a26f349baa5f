use mongodb::Database;
use std::sync::Arc;

use crate::audit::AuthAudit;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub audit: Arc<dyn AuthAudit>,
}

impl AppState {
    pub fn new(db: Arc<Database>, audit: Arc<dyn AuthAudit>) -> Self {
        Self { db, audit }
    }
}

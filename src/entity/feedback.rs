use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

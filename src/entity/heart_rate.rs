use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct HeartRateRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub value: i32,
    pub recorded_at: DateTime<Utc>,
}

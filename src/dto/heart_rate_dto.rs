use crate::entity::heart_rate::HeartRateRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct HeartRateCreateDto {
    #[validate(range(min = 20, max = 300, message = "Heart rate must be between 20 and 300 bpm"))]
    pub value: i32,
    /// When omitted the server uses the current time.
    pub recorded_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeartRateReadDto {
    pub id: Uuid,
    pub value: i32,
    pub recorded_at: DateTime<Utc>,
}

impl HeartRateReadDto {
    pub fn from(model: HeartRateRecord) -> HeartRateReadDto {
        Self {
            id: model.id,
            value: model.value,
            recorded_at: model.recorded_at,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct FeedbackCreateDto {
    #[validate(length(min = 1, max = 5000, message = "Feedback message is required"))]
    pub message: String,
}

/// Feedback row joined with the submitting patient, for the admin view.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedbackWithPatientDto {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub patient_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

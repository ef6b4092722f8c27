use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account status values stored in `patients.status`.
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_DEACTIVATED: &str = "deactivated";

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub allergies: String,
    pub chronic_conditions: String,
    pub profile_picture: String,
    pub status: String,
    // reminder_sent is true only after a reminder was delivered for the
    // current last_checkup_date; recording a new date resets it.
    pub last_checkup_date: Option<DateTime<Utc>>,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

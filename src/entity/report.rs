use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct Report {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// Display name supplied by the patient at upload time.
    pub file_name: String,
    /// Name of the file on disk under the reports directory.
    pub stored_file_name: String,
    pub report_type: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct ReportComment {
    pub id: Uuid,
    pub report_id: Uuid,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

use crate::entity::patient::Patient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct PatientRegisterDto {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email format is invalid"))]
    #[validate(length(max = 254, message = "Email must not exceed 254 characters"))]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct PatientLoginDto {
    #[validate(email(message = "Email format is invalid"))]
    #[validate(length(max = 254, message = "Email must not exceed 254 characters"))]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PatientReadDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub allergies: String,
    pub chronic_conditions: String,
    pub profile_picture: String,
    pub status: String,
    pub last_checkup_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PatientReadDto {
    pub fn from(model: Patient) -> PatientReadDto {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            allergies: model.allergies,
            chronic_conditions: model.chronic_conditions,
            profile_picture: model.profile_picture,
            status: model.status,
            last_checkup_date: model.last_checkup_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Profile fields collected from the multipart edit-profile form.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdateDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub allergies: Option<String>,
    pub chronic_conditions: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct SetCheckupDateDto {
    pub checkup_date: DateTime<Utc>,
    #[validate(email(message = "Email format is invalid"))]
    pub checkup_email: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CheckupDateReadDto {
    pub last_checkup_date: DateTime<Utc>,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct PatientStatusUpdateDto {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

impl std::fmt::Debug for PatientLoginDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Patient").field("email", &self.email).finish()
    }
}

impl std::fmt::Debug for PatientRegisterDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Patient")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish()
    }
}

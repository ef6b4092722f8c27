pub mod admin_state;
pub mod auth_state;
pub mod feedback_state;
pub mod heart_rate_state;
pub mod patient_state;
pub mod reminder_state;
pub mod report_state;
pub mod token_state;

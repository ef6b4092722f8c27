pub mod admin_handler;
pub mod auth_handler;
pub mod checkup_handler;
pub mod feedback_handler;
pub mod health_handler;
pub mod heart_rate_handler;
pub mod profile_handler;
pub mod register_handler;
pub mod reminder_handler;
pub mod report_handler;

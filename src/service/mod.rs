pub mod admin_service;
pub mod mailer_service;
pub mod patient_service;
pub mod reminder_service;
pub mod token_service;

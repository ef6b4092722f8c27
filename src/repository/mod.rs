pub mod admin_repository;
pub mod feedback_repository;
pub mod heart_rate_repository;
pub mod patient_repository;
pub mod report_repository;

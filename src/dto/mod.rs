pub mod admin_dto;
pub mod feedback_dto;
pub mod heart_rate_dto;
pub mod patient_dto;
pub mod report_dto;
pub mod token_dto;

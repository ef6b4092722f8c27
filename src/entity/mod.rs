pub mod admin;
pub mod feedback;
pub mod heart_rate;
pub mod patient;
pub mod report;

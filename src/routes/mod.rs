pub mod admin;
pub mod feedback;
pub mod health;
pub mod heart_rate;
pub mod patients;
pub mod reminders;
pub mod reports;
pub mod root;

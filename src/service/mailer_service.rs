use crate::config::parameter;
use crate::error::notify_error::NotifyError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Notification delivery seam. The production implementation speaks SMTP;
/// tests substitute a scripted mailer.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), NotifyError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the SMTP transport from configuration. Missing settings are a
    /// startup failure, not a per-send one.
    pub fn from_parameters() -> Result<Self, NotifyError> {
        let host = require("SMTP_HOST")?;
        let user = require("SMTP_USER")?;
        let pass = require("SMTP_PASS")?;
        let from = require("SMTP_FROM")?
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::Transport(format!("SMTP_FROM is not a valid mailbox: {}", e)))?;
        let port = parameter::get_u64("SMTP_PORT") as u16;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(port)
            .credentials(Credentials::new(user, pass))
            .build();

        Ok(Self { transport, from })
    }
}

fn require(key: &str) -> Result<String, NotifyError> {
    parameter::get_optional(key)
        .ok_or_else(|| NotifyError::Transport(format!("{} is not configured", key)))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), NotifyError> {
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|_| NotifyError::InvalidRecipient(to.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        Ok(())
    }
}

/// Confirmation email sent when a patient records a checkup date.
pub fn checkup_confirmation_body(first_name: &str, checkup_date: DateTime<Utc>) -> String {
    format!(
        "<h2>Check-Up Reminder Confirmation</h2>\
         <p>Hello {},</p>\
         <p>We've recorded your last check-up date as <strong>{}</strong>.</p>\
         <p>Please have your next medical check-up within a year. We will send \
         you a reminder when it is due.</p>\
         <br />\
         <p>– HealthCare Storage Team</p>",
        first_name,
        checkup_date.format("%a %b %e %Y")
    )
}

/// Annual reminder email sent by the scheduler.
pub fn checkup_reminder_body(first_name: &str, last_checkup_date: DateTime<Utc>) -> String {
    format!(
        "<h3>Hello {},</h3>\
         <p>This is a friendly reminder that it has been one year since your \
         last medical check-up on <strong>{}</strong>.</p>\
         <p>Please book an appointment with your healthcare provider soon.</p>\
         <br/>\
         <p>Stay healthy,</p>\
         <p><strong>Your HealthCare Storage System</strong></p>",
        first_name,
        last_checkup_date.format("%a %b %e %Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bodies_mention_patient_and_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();

        let confirmation = checkup_confirmation_body("Alia", date);
        assert!(confirmation.contains("Alia"));
        assert!(confirmation.contains("2024"));

        let reminder = checkup_reminder_body("Alia", date);
        assert!(reminder.contains("Alia"));
        assert!(reminder.contains("one year"));
    }
}

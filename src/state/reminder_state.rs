use crate::service::reminder_service::ReminderScheduler;
use std::sync::Arc;

/// State for the secured reminder trigger endpoint.
#[derive(Clone)]
pub struct ReminderState {
    pub(crate) scheduler: Arc<ReminderScheduler>,
    /// Shared secret for the external trigger; distinct from patient and
    /// admin tokens.
    pub(crate) trigger_secret: String,
}

impl ReminderState {
    pub fn new(scheduler: Arc<ReminderScheduler>, trigger_secret: String) -> Self {
        Self {
            scheduler,
            trigger_secret,
        }
    }
}

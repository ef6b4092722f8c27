use crate::config::parameter;
use crate::error::reminder_error::ReminderError;
use crate::service::mailer_service::{checkup_reminder_body, Mailer};
use async_trait::async_trait;
use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Subset of a patient row the scheduler works with.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct DuePatient {
    pub id: uuid::Uuid,
    pub first_name: String,
    pub email: String,
    pub last_checkup_date: DateTime<Utc>,
}

/// Patient store seam used by the scheduler. The production implementation
/// is `PatientRepository`; tests use an in-memory store.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// All patients whose last checkup is at or before `cutoff`, with the
    /// reminder flag unset and an active account.
    async fn find_due(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<DuePatient>, Box<dyn std::error::Error + Send + Sync>>;

    /// Flip the reminder flag for the given checkup date. Returns false when
    /// the record no longer matches (new checkup date or already flagged).
    async fn mark_notified(
        &self,
        id: uuid::Uuid,
        last_checkup_date: DateTime<Utc>,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}

/// Outcome counts of one scan-and-notify cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub eligible: usize,
    pub notified: usize,
    pub failed: usize,
}

/// Scheduler settings, resolved once at startup.
#[derive(Clone)]
pub struct ReminderConfig {
    pub subject: String,
    pub send_timeout: Duration,
}

impl ReminderConfig {
    pub fn from_parameters() -> Self {
        Self {
            subject: "Time for Your Annual Check-Up!".to_string(),
            send_timeout: Duration::from_secs(parameter::get_u64("REMINDER_SEND_TIMEOUT_SECONDS")),
        }
    }
}

pub struct ReminderScheduler {
    store: Arc<dyn ReminderStore>,
    mailer: Arc<dyn Mailer>,
    config: ReminderConfig,
    run_lock: tokio::sync::Mutex<()>,
}

impl ReminderScheduler {
    pub fn new(store: Arc<dyn ReminderStore>, mailer: Arc<dyn Mailer>, config: ReminderConfig) -> Self {
        Self {
            store,
            mailer,
            config,
            run_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Eligibility cutoff: one calendar year before `now` (not a fixed
    /// 365-day duration). Feb 29 clamps to Feb 28 of the previous year.
    pub fn cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(12))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Run one reminder cycle: scan for due patients, send each a reminder,
    /// and durably flag every successful delivery before moving on.
    ///
    /// At most one cycle runs at a time; a concurrent call fails with
    /// `RunInProgress` without doing any work. Per-patient failures are
    /// counted and skipped, never fatal to the batch.
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> Result<BatchResult, ReminderError> {
        let _guard = self
            .run_lock
            .try_lock()
            .map_err(|_| ReminderError::RunInProgress)?;

        let cutoff = Self::cutoff(now);
        let due = self
            .store
            .find_due(cutoff)
            .await
            .map_err(|e| ReminderError::Store(e.to_string()))?;

        let mut result = BatchResult {
            eligible: due.len(),
            ..Default::default()
        };

        if due.is_empty() {
            info!("No checkup reminders due");
            return Ok(result);
        }

        info!("Found {} patient(s) due for a checkup reminder", due.len());

        for patient in due {
            let body = checkup_reminder_body(&patient.first_name, patient.last_checkup_date);
            let send = self.mailer.send(&patient.email, &self.config.subject, &body);

            match tokio::time::timeout(self.config.send_timeout, send).await {
                Ok(Ok(())) => {
                    match self
                        .store
                        .mark_notified(patient.id, patient.last_checkup_date)
                        .await
                    {
                        Ok(true) => {
                            info!("Reminder sent to patient {}", patient.id);
                            result.notified += 1;
                        }
                        Ok(false) => {
                            // The patient recorded a new checkup date while the
                            // send was in flight; leave the new cycle pending.
                            warn!(
                                "Reminder sent to patient {} but the checkup date changed mid-send",
                                patient.id
                            );
                            result.notified += 1;
                        }
                        Err(e) => {
                            error!("Failed to persist reminder flag for patient {}: {}", patient.id, e);
                            result.failed += 1;
                        }
                    }
                }
                Ok(Err(e)) => {
                    warn!("Reminder delivery to patient {} failed: {}", patient.id, e);
                    result.failed += 1;
                }
                Err(_) => {
                    warn!(
                        "Reminder delivery to patient {} timed out after {:?}",
                        patient.id, self.config.send_timeout
                    );
                    result.failed += 1;
                }
            }
        }

        info!(
            "Reminder cycle complete: {} eligible, {} notified, {} failed",
            result.eligible, result.notified, result.failed
        );
        Ok(result)
    }
}

/// Background reminder task with graceful shutdown
pub fn start_reminder_task(
    scheduler: Arc<ReminderScheduler>,
    interval_hours: u64,
    shutdown_token: CancellationToken,
) -> JoinHandle<()> {
    let interval_duration = Duration::from_secs(interval_hours * 3600);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(interval_duration);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match scheduler.run_cycle(Utc::now()).await {
                        Ok(result) => {
                            if result.eligible > 0 {
                                info!(
                                    "Scheduled reminder run: {} eligible, {} notified, {} failed",
                                    result.eligible, result.notified, result.failed
                                );
                            }
                        }
                        Err(ReminderError::RunInProgress) => {
                            warn!("Skipping scheduled reminder run: previous run still in progress");
                        }
                        Err(e) => {
                            error!("Scheduled reminder run failed: {}", e);
                        }
                    }
                }
                _ = shutdown_token.cancelled() => {
                    info!("Reminder task received shutdown signal, stopping gracefully");
                    break;
                }
            }
        }

        info!("Reminder task stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::notify_error::NotifyError;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Clone, Debug)]
    struct StoredPatient {
        first_name: String,
        email: String,
        last_checkup_date: Option<DateTime<Utc>>,
        reminder_sent: bool,
        active: bool,
    }

    /// In-memory stand-in for the patients table.
    #[derive(Default)]
    struct InMemoryReminderStore {
        patients: Mutex<HashMap<Uuid, StoredPatient>>,
    }

    impl InMemoryReminderStore {
        fn add(
            &self,
            last_checkup_date: Option<DateTime<Utc>>,
            reminder_sent: bool,
            active: bool,
        ) -> Uuid {
            let id = Uuid::now_v7();
            self.patients.lock().unwrap().insert(
                id,
                StoredPatient {
                    first_name: "Test".to_string(),
                    email: format!("{}@example.com", id),
                    last_checkup_date,
                    reminder_sent,
                    active,
                },
            );
            id
        }

        /// Mirrors the repository's set_checkup_date: new date, flag cleared.
        fn set_checkup_date(&self, id: Uuid, date: DateTime<Utc>) {
            let mut patients = self.patients.lock().unwrap();
            let patient = patients.get_mut(&id).unwrap();
            patient.last_checkup_date = Some(date);
            patient.reminder_sent = false;
        }

        fn reminder_sent(&self, id: Uuid) -> bool {
            self.patients.lock().unwrap()[&id].reminder_sent
        }
    }

    #[async_trait]
    impl ReminderStore for InMemoryReminderStore {
        async fn find_due(
            &self,
            cutoff: DateTime<Utc>,
        ) -> Result<Vec<DuePatient>, Box<dyn std::error::Error + Send + Sync>> {
            let patients = self.patients.lock().unwrap();
            let mut due: Vec<DuePatient> = patients
                .iter()
                .filter_map(|(id, p)| {
                    let last = p.last_checkup_date?;
                    (last <= cutoff && !p.reminder_sent && p.active).then(|| DuePatient {
                        id: *id,
                        first_name: p.first_name.clone(),
                        email: p.email.clone(),
                        last_checkup_date: last,
                    })
                })
                .collect();
            due.sort_by_key(|p| p.last_checkup_date);
            Ok(due)
        }

        async fn mark_notified(
            &self,
            id: Uuid,
            last_checkup_date: DateTime<Utc>,
        ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
            let mut patients = self.patients.lock().unwrap();
            match patients.get_mut(&id) {
                Some(p)
                    if p.last_checkup_date == Some(last_checkup_date) && !p.reminder_sent =>
                {
                    p.reminder_sent = true;
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    /// Scripted mailer: records deliveries, fails configured addresses, and
    /// can delay every send.
    #[derive(Default)]
    struct MockMailer {
        sent: Mutex<Vec<String>>,
        failing: Mutex<Vec<String>>,
        delay: Option<Duration>,
    }

    impl MockMailer {
        fn fail_address(&self, address: &str) {
            self.failing.lock().unwrap().push(address.to_string());
        }

        fn clear_failures(&self) {
            self.failing.lock().unwrap().clear();
        }

        fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, to: &str, _subject: &str, _html_body: &str) -> Result<(), NotifyError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.failing.lock().unwrap().contains(&to.to_string()) {
                return Err(NotifyError::SendFailed("simulated failure".to_string()));
            }
            self.sent.lock().unwrap().push(to.to_string());
            Ok(())
        }
    }

    fn test_config() -> ReminderConfig {
        ReminderConfig {
            subject: "Time for Your Annual Check-Up!".to_string(),
            send_timeout: Duration::from_secs(5),
        }
    }

    fn scheduler_with(
        store: Arc<InMemoryReminderStore>,
        mailer: Arc<MockMailer>,
    ) -> ReminderScheduler {
        ReminderScheduler::new(store, mailer, test_config())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap()
    }

    fn days_ago(reference: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        reference - chrono::Duration::days(days)
    }

    #[test]
    fn test_cutoff_is_a_calendar_year() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 30, 0).unwrap();
        let cutoff = ReminderScheduler::cutoff(now);
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_cutoff_clamps_leap_day() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let cutoff = ReminderScheduler::cutoff(now);
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2023, 2, 28, 12, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_exactly_one_year_is_eligible_one_day_less_is_not() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer::default());
        let now = now();

        let on_boundary = store.add(Some(ReminderScheduler::cutoff(now)), false, true);
        let one_day_short =
            store.add(Some(ReminderScheduler::cutoff(now) + chrono::Duration::days(1)), false, true);

        let result = scheduler_with(store.clone(), mailer).run_cycle(now).await.unwrap();

        assert_eq!(result.eligible, 1);
        assert_eq!(result.notified, 1);
        assert!(store.reminder_sent(on_boundary));
        assert!(!store.reminder_sent(one_day_short));
    }

    #[tokio::test]
    async fn test_overdue_patient_is_notified_and_flagged() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer::default());
        let now = now();

        let patient = store.add(Some(days_ago(now, 400)), false, true);

        let result = scheduler_with(store.clone(), mailer.clone())
            .run_cycle(now)
            .await
            .unwrap();

        assert_eq!(
            result,
            BatchResult {
                eligible: 1,
                notified: 1,
                failed: 0
            }
        );
        assert_eq!(mailer.sent_count(), 1);
        assert!(store.reminder_sent(patient));
    }

    #[tokio::test]
    async fn test_recent_checkup_is_not_notified() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer::default());
        let now = now();

        let patient = store.add(Some(days_ago(now, 200)), false, true);

        let result = scheduler_with(store.clone(), mailer.clone())
            .run_cycle(now)
            .await
            .unwrap();

        assert_eq!(result, BatchResult::default());
        assert_eq!(mailer.sent_count(), 0);
        assert!(!store.reminder_sent(patient));
    }

    #[tokio::test]
    async fn test_deactivated_patient_is_skipped() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer::default());
        let now = now();

        store.add(Some(days_ago(now, 400)), false, false);

        let result = scheduler_with(store.clone(), mailer.clone())
            .run_cycle(now)
            .await
            .unwrap();

        assert_eq!(result, BatchResult::default());
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_unset_checkup_date_is_never_eligible() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer::default());

        store.add(None, false, true);

        let result = scheduler_with(store, mailer).run_cycle(now()).await.unwrap();
        assert_eq!(result, BatchResult::default());
    }

    #[tokio::test]
    async fn test_second_run_notifies_nobody() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer::default());
        let now = now();

        store.add(Some(days_ago(now, 400)), false, true);
        store.add(Some(days_ago(now, 500)), false, true);

        let scheduler = scheduler_with(store.clone(), mailer.clone());

        let first = scheduler.run_cycle(now).await.unwrap();
        assert_eq!(first.notified, 2);

        let second = scheduler.run_cycle(now).await.unwrap();
        assert_eq!(second, BatchResult::default());
        assert_eq!(mailer.sent_count(), 2);
    }

    #[tokio::test]
    async fn test_new_checkup_date_restarts_the_cycle() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer::default());
        let now = now();

        let patient = store.add(Some(days_ago(now, 400)), false, true);
        let scheduler = scheduler_with(store.clone(), mailer.clone());

        scheduler.run_cycle(now).await.unwrap();
        assert!(store.reminder_sent(patient));

        // Patient records a fresh checkup: flag resets, not yet due again
        store.set_checkup_date(patient, days_ago(now, 10));
        assert!(!store.reminder_sent(patient));
        let result = scheduler.run_cycle(now).await.unwrap();
        assert_eq!(result, BatchResult::default());

        // A year later the new cycle comes due
        let later = now + chrono::Duration::days(370);
        let result = scheduler.run_cycle(later).await.unwrap();
        assert_eq!(result.notified, 1);
        assert_eq!(mailer.sent_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_delivery_is_counted_and_retried() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer::default());
        let now = now();

        let patient = store.add(Some(days_ago(now, 400)), false, true);
        let email = store.patients.lock().unwrap()[&patient].email.clone();
        mailer.fail_address(&email);

        let scheduler = scheduler_with(store.clone(), mailer.clone());

        let first = scheduler.run_cycle(now).await.unwrap();
        assert_eq!(
            first,
            BatchResult {
                eligible: 1,
                notified: 0,
                failed: 1
            }
        );
        assert!(!store.reminder_sent(patient));

        // Transient failure clears; the next run picks the patient up again
        mailer.clear_failures();
        let second = scheduler.run_cycle(now).await.unwrap();
        assert_eq!(second.notified, 1);
        assert!(store.reminder_sent(patient));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_the_batch() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer::default());
        let now = now();

        let ok_a = store.add(Some(days_ago(now, 500)), false, true);
        let failing = store.add(Some(days_ago(now, 450)), false, true);
        let ok_b = store.add(Some(days_ago(now, 400)), false, true);

        let email = store.patients.lock().unwrap()[&failing].email.clone();
        mailer.fail_address(&email);

        let result = scheduler_with(store.clone(), mailer)
            .run_cycle(now)
            .await
            .unwrap();

        assert_eq!(
            result,
            BatchResult {
                eligible: 3,
                notified: 2,
                failed: 1
            }
        );
        assert!(store.reminder_sent(ok_a));
        assert!(store.reminder_sent(ok_b));
        assert!(!store.reminder_sent(failing));
    }

    #[tokio::test]
    async fn test_slow_delivery_times_out_as_failure() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer {
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        });
        let now = now();

        let patient = store.add(Some(days_ago(now, 400)), false, true);

        let config = ReminderConfig {
            subject: "Time for Your Annual Check-Up!".to_string(),
            send_timeout: Duration::from_millis(10),
        };
        let scheduler = ReminderScheduler::new(store.clone(), mailer, config);

        let result = scheduler.run_cycle(now).await.unwrap();
        assert_eq!(
            result,
            BatchResult {
                eligible: 1,
                notified: 0,
                failed: 1
            }
        );
        assert!(!store.reminder_sent(patient));
    }

    #[tokio::test]
    async fn test_concurrent_run_is_rejected() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer {
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        });
        let now = now();

        store.add(Some(days_ago(now, 400)), false, true);

        let scheduler = Arc::new(scheduler_with(store, mailer));

        let background = {
            let scheduler = Arc::clone(&scheduler);
            tokio::spawn(async move { scheduler.run_cycle(now).await })
        };

        // Give the first run time to take the lock and park in the send
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = scheduler.run_cycle(now).await;
        assert!(matches!(second, Err(ReminderError::RunInProgress)));

        let first = background.await.unwrap().unwrap();
        assert_eq!(first.notified, 1);
    }

    /// Mailer that records a new checkup date for the patient while the
    /// reminder is being delivered, racing the flag update.
    struct RacingMailer {
        store: Arc<InMemoryReminderStore>,
        new_date: DateTime<Utc>,
    }

    #[async_trait]
    impl Mailer for RacingMailer {
        async fn send(&self, to: &str, _subject: &str, _html_body: &str) -> Result<(), NotifyError> {
            let id = {
                let patients = self.store.patients.lock().unwrap();
                *patients
                    .iter()
                    .find(|(_, p)| p.email == to)
                    .map(|(id, _)| id)
                    .unwrap()
            };
            self.store.set_checkup_date(id, self.new_date);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_lost_compare_and_set_keeps_new_cycle_pending() {
        let store = Arc::new(InMemoryReminderStore::default());
        let now = now();

        let patient = store.add(Some(days_ago(now, 400)), false, true);

        let mailer = Arc::new(RacingMailer {
            store: Arc::clone(&store),
            new_date: days_ago(now, 1),
        });
        let scheduler = ReminderScheduler::new(store.clone(), mailer, test_config());

        let result = scheduler.run_cycle(now).await.unwrap();

        // The mail went out, but the flag must not cover the new checkup date
        assert_eq!(result.notified, 1);
        assert!(!store.reminder_sent(patient));

        let second = scheduler.run_cycle(now).await.unwrap();
        assert_eq!(second, BatchResult::default());
    }

    #[tokio::test]
    async fn test_reminder_task_stops_on_cancellation() {
        let store = Arc::new(InMemoryReminderStore::default());
        let mailer = Arc::new(MockMailer::default());
        let scheduler = Arc::new(scheduler_with(store, mailer));

        let shutdown = CancellationToken::new();
        let handle = start_reminder_task(Arc::clone(&scheduler), 24, shutdown.clone());

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(result.is_ok(), "reminder task should stop after cancellation");
    }
}

use crate::config::database::DatabaseTrait;
use crate::config::{database, parameter};
use crate::handler::health_handler;
use crate::repository::patient_repository::{PatientRepository, PatientRepositoryTrait};
use crate::service::mailer_service::{Mailer, SmtpMailer};
use crate::service::reminder_service::{start_reminder_task, ReminderConfig, ReminderScheduler};
use crate::state::reminder_state::ReminderState;
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod dto;
mod entity;
mod error;
mod handler;
mod middleware;
mod repository;
mod response;
mod routes;
mod service;
mod state;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt::init();

    info!("Starting healthstore API...");

    // Initialize configuration
    parameter::init();
    info!("Configuration initialized");

    // Initialize logging configuration
    config::logging::init();

    // Initialize health check start time
    health_handler::init_start_time();

    // Initialize database connection
    let connection = match database::Database::init().await {
        Ok(conn) => {
            info!("Database connection established successfully");
            conn
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(Box::new(e) as Box<dyn std::error::Error>);
        }
    };
    let db_conn = Arc::new(connection);

    // The external reminder trigger requires this secret; startup fails
    // without it.
    let trigger_secret = match parameter::get_optional("REMINDER_TRIGGER_SECRET") {
        Some(secret) if !secret.is_empty() => secret,
        _ => {
            error!("REMINDER_TRIGGER_SECRET is not configured");
            return Err(Box::new(error::AppError::Config(
                "REMINDER_TRIGGER_SECRET is not configured".to_string(),
            )) as Box<dyn std::error::Error>);
        }
    };

    // Initialize the mail transport
    let mailer: Arc<dyn Mailer> = match SmtpMailer::from_parameters() {
        Ok(mailer) => {
            info!("Mail transport initialized");
            Arc::new(mailer)
        }
        Err(e) => {
            error!("Failed to initialize mail transport: {}", e);
            return Err(Box::new(e) as Box<dyn std::error::Error>);
        }
    };

    // Build the reminder scheduler over the patient store
    let scheduler = Arc::new(ReminderScheduler::new(
        Arc::new(PatientRepository::new(&db_conn)),
        Arc::clone(&mailer),
        ReminderConfig::from_parameters(),
    ));
    let reminder_state = ReminderState::new(Arc::clone(&scheduler), trigger_secret);

    // Start the periodic reminder task with graceful shutdown
    let interval_hours = parameter::get_u64("REMINDER_INTERVAL_HOURS");
    info!("Reminder interval: {} hours", interval_hours);
    let reminder_shutdown_token = tokio_util::sync::CancellationToken::new();
    let reminder_task_handle = start_reminder_task(
        Arc::clone(&scheduler),
        interval_hours,
        reminder_shutdown_token.clone(),
    );
    info!("Reminder task started");

    // Get server configuration
    let server_address = parameter::get("SERVER_ADDRESS");
    let server_port = parameter::get("SERVER_PORT");
    let host = format!("{}:{}", server_address, server_port);
    info!("Server will bind to: {}", host);

    // Bind to the host address
    let listener = match tokio::net::TcpListener::bind(&host).await {
        Ok(listener) => {
            info!("Server successfully bound to {}", host);
            listener
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", host, e);
            return Err(e.into());
        }
    };

    // Create a channel for shutdown signal
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Spawn a task to listen for shutdown signals
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal, initiating graceful shutdown...");
                reminder_shutdown_token.cancel();
                let _ = shutdown_tx.send(());
            }
            Err(err) => {
                error!("Unable to listen for shutdown signal: {}", err);
            }
        }
    });

    // Initialize routes; token service construction validates the JWT secret
    let app = match routes::root::routes(Arc::clone(&db_conn), mailer, reminder_state) {
        Ok(router) => router,
        Err(e) => {
            error!("Failed to initialize routes: {}", e);
            return Err(format!("Failed to initialize routes: {}", e).into());
        }
    };

    // Start the server with shutdown signal
    info!("Server starting...");
    match axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_rx.await.ok();
            // Wait for the reminder task to finish
            if let Err(e) = reminder_task_handle.await {
                error!("Error waiting for reminder task to finish: {}", e);
            }
        })
        .await
    {
        Ok(_) => {
            info!("Server shutdown gracefully");
            Ok(())
        }
        Err(e) => {
            error!("Server error: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}

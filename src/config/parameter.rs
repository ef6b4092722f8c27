use dotenv;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{error, info, warn};

static CONFIG: OnceLock<HashMap<String, String>> = OnceLock::new();

/// Default configuration values
const DEFAULTS: &[(&str, &str)] = &[
    ("SERVER_ADDRESS", "127.0.0.1"),
    ("SERVER_PORT", "8080"),
    ("JWT_TTL_IN_MINUTES", "60"),
    ("BCRYPT_COST", "12"),
    ("LOG_LEVEL", "info"),
    ("SMTP_PORT", "465"),
    // Reminder scheduler configuration
    ("REMINDER_INTERVAL_HOURS", "24"),
    ("REMINDER_SEND_TIMEOUT_SECONDS", "30"),
    // Upload storage locations
    ("UPLOADS_DIR", "uploads"),
    ("REPORTS_DIR", "uploads/reports"),
    ("PROFILE_PICTURES_DIR", "uploads/profile_pictures"),
];

/// Secrets and connection settings with no safe default; environment only.
const ENV_ONLY: &[&str] = &[
    "DATABASE_URL",
    "JWT_SECRET",
    "REMINDER_TRIGGER_SECRET",
    "SMTP_HOST",
    "SMTP_USER",
    "SMTP_PASS",
    "SMTP_FROM",
    "ENV",
    "DB_MAX_CONNECTIONS",
    "DB_MIN_CONNECTIONS",
    "DB_ACQUIRE_TIMEOUT_SECONDS",
    "DB_IDLE_TIMEOUT_SECONDS",
    "DB_MAX_LIFETIME_SECONDS",
];

pub fn init() {
    match dotenv::dotenv() {
        Ok(path) => info!("Loaded environment file: {:?}", path),
        Err(_) => warn!("No .env file found, using system environment variables"),
    }

    let mut config = HashMap::new();

    // Load defaults first
    for (key, value) in DEFAULTS {
        config.insert(key.to_string(), value.to_string());
    }

    // Override with environment variables
    for key in DEFAULTS
        .iter()
        .map(|(key, _)| *key)
        .chain(ENV_ONLY.iter().copied())
    {
        if let Ok(value) = std::env::var(key) {
            config.insert(key.to_string(), value);
        }
    }

    if CONFIG.set(config).is_err() {
        error!("Configuration already initialized");
    } else {
        info!("Configuration initialized successfully");
    }
}

pub fn get(parameter: &str) -> String {
    CONFIG
        .get()
        .and_then(|config| config.get(parameter))
        .cloned()
        .unwrap_or_else(|| {
            error!("Configuration parameter '{}' not found", parameter);
            panic!("Required configuration parameter '{}' is missing", parameter);
        })
}

pub fn get_optional(parameter: &str) -> Option<String> {
    CONFIG
        .get()
        .and_then(|config| config.get(parameter))
        .cloned()
}

pub fn get_i64(parameter: &str) -> i64 {
    let value = get(parameter);
    value.parse::<i64>().unwrap_or_else(|_| {
        error!("Configuration parameter '{}' is not a valid i64: {}", parameter, value);
        panic!("Configuration parameter '{}' is not a valid i64", parameter);
    })
}

pub fn get_u64(parameter: &str) -> u64 {
    let value = get(parameter);
    value.parse::<u64>().unwrap_or_else(|_| {
        error!("Configuration parameter '{}' is not a valid u64: {}", parameter, value);
        panic!("Configuration parameter '{}' is not a valid u64", parameter);
    })
}

/// Get all configuration parameters (for debugging)
pub fn get_all() -> HashMap<String, String> {
    CONFIG.get().cloned().unwrap_or_default()
}

use std::env;
use std::fmt;

use crate::engine::sla::BusinessCalendar;

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the triage engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub business_hours: BusinessHoursConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let open_hour = hour_var("APP_BUSINESS_OPEN_HOUR", 8)?;
        let close_hour = hour_var("APP_BUSINESS_CLOSE_HOUR", 18)?;
        if open_hour >= close_hour {
            return Err(ConfigError::InvalidBusinessHours {
                open_hour,
                close_hour,
            });
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            business_hours: BusinessHoursConfig {
                open_hour,
                close_hour,
            },
        })
    }
}

fn hour_var(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(name) {
        Ok(raw) => {
            let hour = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidHour { name })?;
            if hour > 24 {
                return Err(ConfigError::InvalidHour { name });
            }
            Ok(hour)
        }
        Err(_) => Ok(default),
    }
}

/// Weekday window used for business-hours SLA arithmetic.
#[derive(Debug, Clone, Copy)]
pub struct BusinessHoursConfig {
    pub open_hour: u32,
    pub close_hour: u32,
}

impl BusinessHoursConfig {
    pub fn calendar(&self) -> Result<BusinessCalendar, ConfigError> {
        BusinessCalendar::new(self.open_hour, self.close_hour).ok_or(
            ConfigError::InvalidBusinessHours {
                open_hour: self.open_hour,
                close_hour: self.close_hour,
            },
        )
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidHour { name: &'static str },
    InvalidBusinessHours { open_hour: u32, close_hour: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHour { name } => {
                write!(f, "{name} must be an hour between 0 and 24")
            }
            ConfigError::InvalidBusinessHours {
                open_hour,
                close_hour,
            } => write!(
                f,
                "business hours must open before they close (got {open_hour}..{close_hour})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_BUSINESS_OPEN_HOUR");
        env::remove_var("APP_BUSINESS_CLOSE_HOUR");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.business_hours.open_hour, 8);
        assert_eq!(config.business_hours.close_hour, 18);
        assert!(config.business_hours.calendar().is_ok());
    }

    #[test]
    fn rejects_inverted_business_hours() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_BUSINESS_OPEN_HOUR", "19");
        env::set_var("APP_BUSINESS_CLOSE_HOUR", "9");
        let err = AppConfig::load().expect_err("inverted hours rejected");
        assert!(matches!(err, ConfigError::InvalidBusinessHours { .. }));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_hours() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_BUSINESS_OPEN_HOUR", "morning");
        let err = AppConfig::load().expect_err("non-numeric hour rejected");
        assert!(matches!(err, ConfigError::InvalidHour { .. }));
        reset_env();
    }
}

// config.rs
use std::env;
use std::fmt;
use std::time::Duration;

use crate::errors::{AppError, Result};

/// One day.
const MAX_OTP_TTL_MINUTES: i64 = 24 * 60;

#[derive(Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub otp_ttl_minutes: i64,
    pub otp_sweep_interval_secs: u64,
    pub mail: MailConfig,
    pub mt5_api_base_url: String,
    pub mt5_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| AppError::configuration(format!("{} must be set", key)))
        };

        let username = required("EMAIL_USER")?;
        let password = required("EMAIL_PASS")?;
        let from = lookup("EMAIL_FROM").unwrap_or_else(|| username.clone());

        let otp_ttl_minutes: i64 = parse_or(&lookup, "OTP_TTL_MINUTES", 10)?;
        if !(1..=MAX_OTP_TTL_MINUTES).contains(&otp_ttl_minutes) {
            return Err(AppError::configuration(format!(
                "OTP_TTL_MINUTES must be between 1 and {}",
                MAX_OTP_TTL_MINUTES
            )));
        }

        let otp_sweep_interval_secs: u64 = parse_or(&lookup, "OTP_SWEEP_INTERVAL_SECS", 60)?;
        if otp_sweep_interval_secs == 0 {
            return Err(AppError::configuration(
                "OTP_SWEEP_INTERVAL_SECS must be positive",
            ));
        }

        Ok(AppConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 4000)?,
            otp_ttl_minutes,
            otp_sweep_interval_secs,
            mail: MailConfig {
                smtp_host: lookup("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
                username,
                password,
                from,
            },
            mt5_api_base_url: lookup("MT5_API_BASE_URL")
                .unwrap_or_else(|| "https://your-mt5-server-api.com".to_string()),
            mt5_timeout_ms: parse_or(&lookup, "MT5_TIMEOUT_MS", 5000)?,
        })
    }

    pub fn otp_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.otp_ttl_minutes)
    }

    pub fn otp_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.otp_sweep_interval_secs)
    }

    pub fn mt5_timeout(&self) -> Duration {
        Duration::from_millis(self.mt5_timeout_ms)
    }

    pub fn get_config_info(&self) -> serde_json::Value {
        serde_json::json!({
            "host": self.host,
            "port": self.port,
            "otp_ttl_minutes": self.otp_ttl_minutes,
            "otp_sweep_interval_secs": self.otp_sweep_interval_secs,
            "smtp_host": self.mail.smtp_host,
            "mail_from": self.mail.from,
            "mt5_api_base_url": self.mt5_api_base_url,
            "mt5_timeout_ms": self.mt5_timeout_ms,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("{} must be a number, got {:?}", key, raw))),
        None => Ok(default),
    }
}

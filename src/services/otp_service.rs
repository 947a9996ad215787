use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use rand::Rng;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::models::otp::OtpBinding;
use crate::services::clock::Clock;
use crate::services::mailer::Mailer;
use crate::services::otp_store::OtpStore;

#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Email is required")]
    EmailMissing,

    #[error("Email and OTP are required")]
    InputMissing,

    #[error("OTP not found or expired")]
    NoBinding,

    #[error("OTP expired")]
    Expired,

    #[error("Invalid OTP")]
    Mismatch,

    #[error("Failed to send OTP email: {0}")]
    DeliveryFailed(String),

    #[error("OTP expiry out of range")]
    ExpiryOutOfRange,
}

#[derive(Clone)]
pub struct OTPService {
    store: Arc<OtpStore>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl OTPService {
    pub fn new(mailer: Arc<dyn Mailer>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            store: Arc::new(OtpStore::new()),
            mailer,
            clock,
            ttl,
        }
    }

    // Generate 6-digit OTP, never with a leading zero
    pub fn generate_otp() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(100_000..=999_999).to_string()
    }

    pub fn otp_email(&self, code: &str) -> (&'static str, String) {
        let body = format!(
            "Your OTP code is: {}. It will expire in {} minutes.",
            code,
            self.ttl.num_minutes()
        );
        ("Your OTP Code", body)
    }

    /// Binds a fresh code to `email` and mails it.
    ///
    /// The binding stays stored even when delivery fails; the caller only
    /// learns that the mail did not go out.
    pub async fn send_otp(&self, email: &str) -> Result<OtpBinding, OtpError> {
        if email.is_empty() {
            return Err(OtpError::EmailMissing);
        }

        let expires_at = self
            .clock
            .now()
            .checked_add_signed(self.ttl)
            .ok_or(OtpError::ExpiryOutOfRange)?;
        let binding = OtpBinding::new(Self::generate_otp(), expires_at);
        self.store.insert(email, binding.clone());
        tracing::info!(email, expires_at = %binding.expires_at, "OTP issued");

        let (subject, body) = self.otp_email(&binding.code);
        if let Err(e) = self.mailer.send(email, subject, &body).await {
            tracing::error!(email, "Error sending OTP email: {:#}", e);
            return Err(OtpError::DeliveryFailed(e.to_string()));
        }

        Ok(binding)
    }

    pub fn verify_otp(&self, email: &str, code: &str) -> Result<(), OtpError> {
        if email.is_empty() || code.is_empty() {
            return Err(OtpError::InputMissing);
        }

        let outcome = self.store.verify(email, code, self.clock.now());
        match &outcome {
            Ok(()) => tracing::info!(email, "OTP verified"),
            Err(e) => tracing::warn!(email, "OTP verification failed: {}", e),
        }
        outcome
    }

    /// Drops bindings that have been expired for longer than one TTL.
    ///
    /// Recently expired bindings are left for the verifier, which reports
    /// them as `Expired` before deleting them.
    pub fn purge_expired(&self) -> usize {
        match self.clock.now().checked_sub_signed(self.ttl) {
            Some(cutoff) => self.store.purge_expired(cutoff),
            None => 0,
        }
    }

    pub fn pending(&self) -> usize {
        self.store.len()
    }

    /// Periodically drops long-expired bindings (see `purge_expired`).
    pub fn spawn_sweeper(&self, every: StdDuration) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let removed = service.purge_expired();
                if removed > 0 {
                    tracing::debug!(removed, "Purged expired OTP bindings");
                }
            }
        })
    }
}

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::models::otp::OtpBinding;
use crate::services::otp_service::OtpError;

/// Process-local map of email -> live OTP binding.
///
/// Every operation holds the lock for its whole read-check-delete sequence, so
/// two concurrent verifications of the same code cannot both succeed and a
/// verification cannot delete a binding that is being re-issued.
#[derive(Debug, Default)]
pub struct OtpStore {
    bindings: Mutex<HashMap<String, OtpBinding>>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, OtpBinding>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.bindings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `binding` under `email`, replacing (and invalidating) any previous one.
    pub fn insert(&self, email: &str, binding: OtpBinding) {
        self.lock().insert(email.to_string(), binding);
    }

    pub fn verify(&self, email: &str, code: &str, now: DateTime<Utc>) -> Result<(), OtpError> {
        let mut bindings = self.lock();

        let binding = bindings.get(email).ok_or(OtpError::NoBinding)?;

        if binding.is_expired(now) {
            bindings.remove(email);
            return Err(OtpError::Expired);
        }

        if binding.code != code {
            return Err(OtpError::Mismatch);
        }

        bindings.remove(email);
        Ok(())
    }

    /// Drops every binding that is already expired at `now`. Returns how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut bindings = self.lock();
        let before = bindings.len();
        bindings.retain(|_, binding| !binding.is_expired(now));
        before - bindings.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

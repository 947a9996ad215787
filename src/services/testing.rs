//! Fakes for the mail, validator and clock capabilities.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::account::AccountCredentials;
use crate::services::clock::Clock;
use crate::services::mailer::Mailer;
use crate::services::mt5_client::AccountValidator;

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        }
    }
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Records every message; optionally fails after recording it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    failure: Mutex<Option<String>>,
}

impl RecordingMailer {
    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock().unwrap() = Some(reason.to_string());
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    /// The six-digit code from the most recent message body.
    pub fn last_code(&self) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        let body = &sent.last()?.body;
        body.split(|c: char| !c.is_ascii_digit())
            .find(|chunk| chunk.len() == 6)
            .map(str::to_string)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        match self.failure.lock().unwrap().clone() {
            Some(reason) => Err(anyhow::anyhow!(reason)),
            None => Ok(()),
        }
    }
}

pub struct StubValidator {
    answer: Result<bool, String>,
    calls: AtomicUsize,
    last_seen: Mutex<Option<AccountCredentials>>,
}

impl StubValidator {
    pub fn answering(valid: bool) -> Self {
        Self::with(Ok(valid))
    }

    pub fn failing(reason: &str) -> Self {
        Self::with(Err(reason.to_string()))
    }

    fn with(answer: Result<bool, String>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            last_seen: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_seen(&self) -> Option<AccountCredentials> {
        self.last_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountValidator for StubValidator {
    async fn validate(&self, credentials: &AccountCredentials) -> anyhow::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_seen.lock().unwrap() = Some(credentials.clone());
        self.answer.clone().map_err(|reason| anyhow::anyhow!(reason))
    }
}

use anyhow::Context;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::MailConfig;
use crate::errors::{AppError, Result};

/// Outbound mail capability used by the OTP issuer.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| AppError::configuration(format!("Invalid EMAIL_FROM address: {}", e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| AppError::configuration(format!("Invalid SMTP relay: {}", e)))?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { from, transport })
    }

    fn build_message(&self, recipient: &str, subject: &str, body: &str) -> anyhow::Result<Message> {
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("invalid recipient address {:?}", recipient))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .context("failed to build email")
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let message = self.build_message(recipient, subject, body)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send email: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SmtpMailer {
        SmtpMailer::new(&MailConfig {
            smtp_host: "smtp.example.com".into(),
            username: "desk@broker.io".into(),
            password: "pw".into(),
            from: "desk@broker.io".into(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn message_carries_sender_recipient_and_subject() {
        let message = mailer()
            .build_message("a@b.com", "Your OTP Code", "Your OTP code is: 123456.")
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("From: desk@broker.io"));
        assert!(raw.contains("To: a@b.com"));
        assert!(raw.contains("Subject: Your OTP Code"));
    }

    #[tokio::test]
    async fn unparseable_recipient_fails_before_any_network_io() {
        let err = mailer()
            .send("not-an-address", "Your OTP Code", "body")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid recipient"));
    }

    #[test]
    fn bad_sender_is_a_configuration_error() {
        let result = SmtpMailer::new(&MailConfig {
            smtp_host: "smtp.example.com".into(),
            username: "desk".into(),
            password: "pw".into(),
            from: "desk".into(),
        });
        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }
}

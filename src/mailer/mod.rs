//! Outgoing mail for password reset codes.
//!
//! With `smtp.enabled = false` messages go to the log instead, which keeps
//! local setups usable without a mail server.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{AppConfig, SmtpConfig};
use crate::errors::{GradeSysError, Result};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: String) -> Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        }
        .map_err(|e| GradeSysError::mail(format!("Invalid SMTP host {}: {e}", config.host)))?;

        let mut builder = builder.port(config.port);
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: String) -> Result<()> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| GradeSysError::mail(format!("Invalid sender address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| GradeSysError::mail(format!("Invalid recipient address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| GradeSysError::mail(format!("Cannot build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| GradeSysError::mail(format!("SMTP delivery failed: {e}")))?;
        Ok(())
    }
}

/// Writes messages to the log. Bodies carry live reset codes, so they are only
/// printed in development.
pub struct LogMailer {
    reveal_body: bool,
}

impl LogMailer {
    pub fn new(reveal_body: bool) -> Self {
        Self { reveal_body }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: String) -> Result<()> {
        if self.reveal_body {
            info!(to, subject, "SMTP disabled, message not sent: {}", body);
        } else {
            warn!(to, subject, "SMTP disabled, message dropped");
        }
        Ok(())
    }
}

/// A production server must not silently stop delivering reset codes
fn smtp_fallback(err: GradeSysError, production: bool) -> Result<LogMailer> {
    if production {
        return Err(err);
    }
    warn!("{}, falling back to logging mails", err);
    Ok(LogMailer::new(false))
}

pub fn create_mailer() -> Result<Arc<dyn Mailer>> {
    let app = AppConfig::get();
    let config = &app.smtp;
    if !config.enabled {
        return Ok(Arc::new(LogMailer::new(app.is_development())));
    }

    match SmtpMailer::new(config) {
        Ok(mailer) => {
            info!("SMTP mailer ready via {}:{}", config.host, config.port);
            Ok(Arc::new(mailer))
        }
        Err(e) => Ok(Arc::new(smtp_fallback(e, app.is_production())?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_smtp_is_fatal_only_in_production() {
        let err = || GradeSysError::mail("Invalid SMTP host mail.invalid");

        assert!(smtp_fallback(err(), true).is_err());
        let fallback = smtp_fallback(err(), false).unwrap();
        assert!(!fallback.reveal_body);
    }

    #[tokio::test]
    async fn log_mailer_never_fails() {
        let mailer = LogMailer::new(false);
        mailer
            .send("registrar@school.edu", "Password reset code", "123456".into())
            .await
            .unwrap();
    }
}

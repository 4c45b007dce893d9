//! Mailer trait and concrete implementations.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("Mail provider rejected message [{status}]: {message}")]
    Rejected { status: u16, message: String },
}

// ── Message ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

// ── 1. HTTP API ───────────────────────────────────────────────────────────────

/// Sends `{from, to, subject, html}` to a transactional email endpoint,
/// authenticated with a bearer key.
pub struct HttpMailer {
    api_url: String,
    api_key: SecretString,
    from: String,
    client: reqwest::Client,
}

impl HttpMailer {
    pub fn new(api_url: impl Into<String>, api_key: SecretString, from: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
            from: from.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let resp = self.client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&OutboundEmail {
                from: &self.from,
                to: &message.to,
                subject: &message.subject,
                html: &message.html,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(MailError::Rejected { status: status.as_u16(), message });
        }

        tracing::debug!(to = %message.to, subject = %message.subject, "email accepted by provider");
        Ok(())
    }
}

// ── 2. Log only ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            bytes = message.html.len(),
            "email not delivered (log mailer)"
        );
        Ok(())
    }
}

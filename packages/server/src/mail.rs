//! Contact message relay through the Resend HTTP API.
//!
//! [`ResendMailer::from_config`] returns `None` unless both the API key and
//! the destination address are configured.

use reqwest::Client;
use serde::Serialize;

use crate::config::MailConfig;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail API rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// A visitor's message from the contact form, already validated.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Serialize)]
struct SendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    reply_to: &'a str,
    text: &'a str,
}

pub struct ResendMailer {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
    to: String,
}

impl ResendMailer {
    pub fn from_config(config: &MailConfig, client: Client) -> Option<Self> {
        let api_key = config.api_key.as_deref().filter(|s| !s.is_empty())?;
        let to = config.contact_to.as_deref().filter(|s| !s.is_empty())?;
        Some(Self {
            client,
            endpoint: format!("{}/emails", config.api_base.trim_end_matches('/')),
            api_key: api_key.to_string(),
            from: config.contact_from.clone(),
            to: to.to_string(),
        })
    }

    /// Send one message. No retry.
    pub async fn send(&self, contact: &ContactMessage) -> Result<(), MailError> {
        let body = SendEmail {
            from: &self.from,
            to: [&self.to],
            subject: format!("New portfolio inquiry from {}", contact.name),
            reply_to: &contact.email,
            text: &contact.message,
        };

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body: res.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

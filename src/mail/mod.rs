//! Contact relay - turns a contact form submission into one email
//!
//! The relay validates the form, formats a plain-text message addressed to
//! the site owner and hands it to a [`Mailer`] exactly once. Delivery beyond
//! the relay accepting the message is not tracked, and nothing is retried.

mod smtp;

use async_trait::async_trait;
use lettre::message::Mailbox;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{Result, SiteError};

pub use smtp::SmtpMailer;

/// Contact form exactly as posted; any field may be absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// A complete contact form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl TryFrom<RawContactForm> for ContactForm {
    type Error = SiteError;

    fn try_from(raw: RawContactForm) -> Result<Self> {
        let email = required("email", raw.email)?.trim().to_string();
        // Same parser the SMTP message builder uses for the sender
        let mailbox = email
            .parse::<Mailbox>()
            .ok()
            .filter(|mailbox| mailbox.name.is_none())
            .ok_or_else(|| {
                SiteError::InvalidForm(format!("'{}' is not an email address", email))
            })?;
        let email = mailbox.email.to_string();

        Ok(Self {
            name: required("name", raw.name)?,
            email,
            phone: required("phone", raw.phone)?,
            message: required("message", raw.message)?,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SiteError::InvalidForm(format!("{} is required", field)))
}

/// One outbound message, independent of the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    /// Envelope sender: the visitor's address
    pub from: String,
    /// Envelope recipient: the site owner
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl ContactMessage {
    pub fn from_form(form: &ContactForm, to: &str, subject: &str) -> Self {
        Self {
            from: form.email.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: format!(
                "Name {}\nEmail: {}\nPhone: {}\nMessage: {}",
                form.name, form.email, form.phone, form.message
            ),
        }
    }
}

/// Something that can deliver a [`ContactMessage`]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &ContactMessage) -> Result<()>;
}

/// Relays contact forms to the site owner
#[derive(Clone)]
pub struct ContactRelay {
    mailer: Arc<dyn Mailer>,
    owner: String,
    subject: String,
}

impl ContactRelay {
    pub fn new(mailer: Arc<dyn Mailer>, owner: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            mailer,
            owner: owner.into(),
            subject: subject.into(),
        }
    }

    /// Send one message for `form`
    pub async fn relay(&self, form: &ContactForm) -> Result<()> {
        let message = ContactMessage::from_form(form, &self.owner, &self.subject);
        tracing::info!("Relaying contact form submission to {}", self.owner);

        self.mailer.send(&message).await.map_err(|e| {
            tracing::error!("Contact relay failed: {}", e);
            e
        })
    }
}

//! SMTP delivery through an authenticated STARTTLS relay

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{ContactMessage, Mailer};
use crate::config::{SmtpConfig, SmtpCredentials};
use crate::error::{Result, SiteError};

/// Sends each message over its own SMTP session.
///
/// The transport is built without a connection pool, so every `send`
/// connects, upgrades to TLS, authenticates, delivers and disconnects. The
/// session is dropped on error paths as well.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, credentials: SmtpCredentials) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| SiteError::Config(format!("SMTP relay {}: {}", config.host, e)))?
            .port(config.port)
            .credentials(Credentials::new(credentials.username, credentials.password))
            .timeout(Some(config.timeout()))
            .build();

        tracing::debug!("SMTP relay {}:{}", config.host, config.port);
        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &ContactMessage) -> Result<()> {
        let email = build_message(message)?;
        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| SiteError::Relay(e.to_string()))?;

        tracing::debug!("SMTP relay answered {:?}", response.code());
        Ok(())
    }
}

/// Build the RFC 5322 message; its envelope follows the From/To headers
fn build_message(message: &ContactMessage) -> Result<Message> {
    let from: Mailbox = message
        .from
        .parse()
        .map_err(|e| SiteError::MessageBuild(format!("sender '{}': {}", message.from, e)))?;
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|e| SiteError::MessageBuild(format!("recipient '{}': {}", message.to, e)))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| SiteError::MessageBuild(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::{ContactForm, RawContactForm};

    fn message() -> ContactMessage {
        ContactMessage {
            from: "ann@example.com".to_string(),
            to: "owner@example.com".to_string(),
            subject: "Day-60-Contact".to_string(),
            body: "Name Ann\nEmail: ann@example.com\nPhone: 555-0100\nMessage: Hi!".to_string(),
        }
    }

    #[test]
    fn test_envelope_uses_sender_and_owner() {
        let email = build_message(&message()).unwrap();
        let envelope = email.envelope();
        assert_eq!(
            envelope.from().map(|a| a.to_string()),
            Some("ann@example.com".to_string())
        );
        let to: Vec<String> = envelope.to().iter().map(|a| a.to_string()).collect();
        assert_eq!(to, vec!["owner@example.com".to_string()]);
    }

    #[test]
    fn test_formatted_message() {
        let email = build_message(&message()).unwrap();
        let formatted = String::from_utf8(email.formatted()).unwrap();
        assert!(formatted.contains("Subject: Day-60-Contact"));
        assert!(formatted.contains("Name Ann"));
        assert!(formatted.contains("Phone: 555-0100"));
        assert!(formatted.contains("Message: Hi!"));
    }

    #[test]
    fn test_validated_sender_always_builds() {
        for email in ["ann@example.com", "ann.lee+blog@mail.example.co.uk"] {
            let form = ContactForm::try_from(RawContactForm {
                name: Some("Ann".to_string()),
                email: Some(email.to_string()),
                phone: Some("555-0100".to_string()),
                message: Some("Hi!".to_string()),
            })
            .unwrap();
            let msg = ContactMessage::from_form(&form, "owner@example.com", "Day-60-Contact");
            assert!(build_message(&msg).is_ok(), "{}", email);
        }
    }

    #[test]
    fn test_bad_recipient() {
        let mut msg = message();
        msg.to = "nobody".to_string();
        assert!(matches!(
            build_message(&msg),
            Err(SiteError::MessageBuild(_))
        ));
    }

    #[test]
    fn test_new_does_not_connect() {
        let credentials = SmtpCredentials {
            username: "owner@example.com".to_string(),
            password: "app-password".to_string(),
        };
        assert!(SmtpMailer::new(&SmtpConfig::default(), credentials).is_ok());
    }
}

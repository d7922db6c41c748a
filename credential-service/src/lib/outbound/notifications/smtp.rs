use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::Message;
use lettre::SmtpTransport;
use lettre::Transport;

use crate::config::MailConfig;
use crate::credential::errors::NotificationError;
use crate::credential::ports::Notifier;

/// SMTP notifier over implicit TLS.
///
/// When mail is disabled in configuration, messages are dropped after a debug
/// log line and `send` succeeds.
pub struct SmtpNotifier {
    transport: Option<SmtpTransport>,
    sender: Mailbox,
}

impl SmtpNotifier {
    /// Build a notifier from mail configuration.
    ///
    /// # Errors
    /// * `InvalidAddress` - Sender address cannot be parsed
    /// * `SendFailed` - SMTP relay could not be configured
    pub fn new(config: &MailConfig) -> Result<Self, NotificationError> {
        let sender = parse_mailbox(&config.sender)?;

        if !config.enabled {
            return Ok(Self {
                transport: None,
                sender,
            });
        }

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport: Some(transport),
            sender,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    fn build_message(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<Message, NotificationError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(subject);

        for recipient in recipients {
            builder = builder.to(parse_mailbox(recipient)?);
        }

        builder
            .body(body.to_string())
            .map_err(|e| NotificationError::BuildFailed(e.to_string()))
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotificationError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotificationError::InvalidAddress(format!("{}: {}", address, e)))
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        let message = self.build_message(recipients, subject, body)?;

        let Some(transport) = self.transport.clone() else {
            tracing::debug!(
                recipients = recipients.len(),
                subject,
                "Mail disabled, message not sent"
            );
            return Ok(());
        };

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        tracing::info!(recipients = recipients.len(), subject, "Email sent");
        Ok(())
    }
}

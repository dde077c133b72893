use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use super::domain::OutgoingMail;
use crate::config::MailConfig;

/// Outbound mail hook. Implementations block until the relay answers.
pub trait MailTransport: Send + Sync {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Mail dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mail address '{address}': {reason}")]
    Address { address: String, reason: String },
    #[error("unable to build mail message: {0}")]
    Build(String),
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|err| MailError::Address {
            address: address.to_string(),
            reason: err.to_string(),
        })
}

pub(crate) fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
    Message::builder()
        .from(mailbox(&mail.from)?)
        .to(mailbox(&mail.to)?)
        .subject(mail.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())
        .map_err(|err| MailError::Build(err.to_string()))
}

/// SMTP relay transport.
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let host = config
            .host
            .as_deref()
            .ok_or_else(|| MailError::Transport("MAIL_HOST is not configured".to_string()))?;

        let builder = if config.starttls {
            SmtpTransport::starttls_relay(host)
                .map_err(|err| MailError::Transport(err.to_string()))?
        } else {
            SmtpTransport::builder_dangerous(host)
        };

        let mut builder = builder.port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(host, port = config.port, starttls = config.starttls, "smtp transport configured");
        Ok(Self {
            transport: builder.build(),
        })
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = build_message(mail)?;
        self.transport
            .send(&message)
            .map_err(|err| MailError::Transport(err.to_string()))?;
        info!(to = %mail.to, subject = %mail.subject, "notification email sent");
        Ok(())
    }
}

/// Writes mail to the log instead of a relay; used when no SMTP host is set.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

impl MailTransport for LogMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        build_message(mail)?;
        info!(
            from = %mail.from,
            to = %mail.to,
            subject = %mail.subject,
            body = %mail.body,
            "notification email logged (no smtp relay configured)"
        );
        Ok(())
    }
}

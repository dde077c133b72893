use std::sync::Arc;

use tracing::warn;

use super::domain::{Notification, OutgoingMail};
use super::mailer::MailTransport;
use crate::error::ServiceError;
use crate::validation::Validator;

/// Formats notifications as email from the configured sender address.
pub struct NotificationService<M: ?Sized> {
    mailer: Arc<M>,
    from: String,
}

impl<M> NotificationService<M>
where
    M: MailTransport + ?Sized,
{
    pub fn new(mailer: Arc<M>, from: impl Into<String>) -> Self {
        Self {
            mailer,
            from: from.into(),
        }
    }

    /// Send synchronously; transport failures are returned, never retried.
    pub fn send_mail(&self, to: &str, notification: &Notification) -> Result<(), ServiceError> {
        Validator::new()
            .email("to", to, "Recipient must be a valid email address")
            .not_blank("subject", &notification.subject, "Subject is required")
            .finish()?;

        let mail = OutgoingMail {
            from: self.from.clone(),
            to: to.trim().to_string(),
            subject: notification.subject.clone(),
            body: notification.message.clone(),
        };

        self.mailer.send(&mail).map_err(|err| {
            warn!(to = %mail.to, error = %err, "notification email failed");
            ServiceError::from(err)
        })
    }
}

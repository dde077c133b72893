use serde::{Deserialize, Serialize};

/// Subject/message pair; built per send and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub subject: String,
    pub message: String,
}

impl Notification {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// `POST /v1/notifications` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationRequest {
    pub to: String,
    pub subject: String,
    pub message: String,
}

impl NotificationRequest {
    pub fn into_parts(self) -> (String, Notification) {
        (self.to, Notification::new(self.subject, self.message))
    }
}

/// Fully addressed plain-text email handed to a [`super::MailTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

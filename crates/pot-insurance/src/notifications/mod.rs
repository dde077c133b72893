//! Outbound email notifications.

pub mod domain;
pub mod mailer;
pub mod router;
pub mod service;

pub use domain::{Notification, NotificationRequest, OutgoingMail};
pub use mailer::{LogMailer, MailError, MailTransport, SmtpMailer};
pub use router::notification_router;
pub use service::NotificationService;

use metrics_exporter_prometheus::PrometheusHandle;
use pot_insurance::config::{AppConfig, MailConfig};
use pot_insurance::error::{AppError, ServiceError};
use pot_insurance::notifications::{LogMailer, MailTransport, SmtpMailer};
use pot_insurance::router::ApiServices;
use pot_insurance::storage::SqliteRepository;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// SMTP relay when `MAIL_HOST` is set, otherwise mail goes to the log.
pub(crate) fn build_mailer(config: &MailConfig) -> Result<Arc<dyn MailTransport>, AppError> {
    if config.host.is_none() {
        warn!("MAIL_HOST not set; notification emails will only be logged");
        return Ok(Arc::new(LogMailer));
    }

    let mailer = SmtpMailer::from_config(config).map_err(ServiceError::from)?;
    Ok(Arc::new(mailer))
}

/// SQLite when `DATABASE_URL` is set, otherwise process-local memory.
pub(crate) async fn build_services(config: &AppConfig) -> Result<ApiServices, AppError> {
    let mailer = build_mailer(&config.mail)?;
    let sender = config.mail.from.clone();

    match config.storage.database_url.as_deref() {
        Some(url) => {
            let repository = SqliteRepository::connect(url).await?;
            Ok(ApiServices::sqlite(repository, mailer, sender))
        }
        None => {
            warn!("DATABASE_URL not set; records are kept in memory and lost on restart");
            Ok(ApiServices::in_memory(mailer, sender))
        }
    }
}
